use axum::{extract::State, Json};
use serde::Serialize;

use crate::http::server::AppState;

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RouteSummary {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

pub async fn get_status() -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
    })
}

pub async fn get_routes(State(state): State<AppState>) -> Json<Vec<RouteSummary>> {
    let routes = state
        .router
        .routes()
        .map(|record| RouteSummary {
            path: record.path().to_string(),
            view: record.view_ref().map(|v| v.name()),
            redirect: record.redirect_target().map(str::to_owned),
        })
        .collect();

    Json(routes)
}
