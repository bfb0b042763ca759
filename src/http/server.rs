//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with status endpoints and the page fallback
//! - Wire up middleware (request ID, tracing, timeout)
//! - Strip the history base and dispatch paths to the view router
//! - Answer redirects with `302 Found`, views with their shell page
//! - Drain in-flight requests on shutdown

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Method, Request, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::http::request::{
    MakeRequestUuid, PropagateRequestIdLayer, RequestIdExt, SetRequestIdLayer,
};
use crate::http::shell::render_shell;
use crate::http::status::{get_routes, get_status};
use crate::observability::metrics::{self, ResolutionOutcome};
use crate::routing::history::{join_base, normalize_base, strip_base};
use crate::routing::{Resolution, Router as ViewRouter};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<ViewRouter>,
    /// Normalised history base (`""` or `/app`).
    pub base: Arc<str>,
}

/// HTTP front end serving the application shell.
pub struct HttpServer {
    app: Router,
    config: AppConfig,
}

impl HttpServer {
    /// Create a server for `router`. The router is built once by the
    /// caller and shared with anything else that navigates.
    pub fn new(config: AppConfig, router: Arc<ViewRouter>) -> Self {
        let state = AppState {
            router,
            base: normalize_base(&config.history.base).into(),
        };
        let app = Self::build_app(&config, state);
        Self { app, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_app(config: &AppConfig, state: AppState) -> Router {
        Router::new()
            .route("/_status", get(get_status))
            .route("/_routes", get(get_routes))
            .fallback(page_handler)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %req.method(),
                    uri = %req.uri(),
                    request_id = %req.headers().request_id(),
                )
            }))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The Axum application, for embedding or in-process tests.
    pub fn app(&self) -> Router {
        self.app.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            base = %normalize_base(&self.config.history.base),
            "HTTP server starting"
        );

        axum::serve(listener, self.app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Serve the shell for a routed path.
async fn page_handler(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    let start = Instant::now();
    let request_id = headers.request_id();

    if method != Method::GET && method != Method::HEAD {
        let response = (
            StatusCode::METHOD_NOT_ALLOWED,
            [(header::ALLOW, "GET, HEAD")],
        )
            .into_response();
        metrics::record_request(method.as_str(), response.status().as_u16(), "none", start);
        return response;
    }

    let target = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");
    let (response, outcome, route) = resolve_page(&state, target, request_id);

    metrics::record_resolution(outcome);
    metrics::record_request(method.as_str(), response.status().as_u16(), &route, start);
    response
}

fn resolve_page(
    state: &AppState,
    target: &str,
    request_id: &str,
) -> (Response, ResolutionOutcome, String) {
    let Some(path) = strip_base(&state.base, target) else {
        tracing::warn!(request_id = %request_id, target = %target, "Request outside history base");
        return (not_found(state), ResolutionOutcome::Unmatched, "none".into());
    };

    match state.router.resolve(&path) {
        Err(e) => {
            tracing::warn!(request_id = %request_id, path = %path, error = %e, "Invalid path");
            (
                (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
                ResolutionOutcome::Invalid,
                "none".into(),
            )
        }
        Ok(Resolution::Unmatched(location)) => {
            tracing::warn!(request_id = %request_id, location = %location, "No route matched");
            (not_found(state), ResolutionOutcome::Unmatched, "none".into())
        }
        Ok(Resolution::Matched(route)) if route.is_redirect() => {
            let href = join_base(&state.base, &route.location);
            tracing::debug!(
                request_id = %request_id,
                from = %path,
                to = %href,
                "Redirecting"
            );
            (
                (StatusCode::FOUND, [(header::LOCATION, href)]).into_response(),
                ResolutionOutcome::Redirect,
                route.matched,
            )
        }
        Ok(Resolution::Matched(route)) => {
            tracing::debug!(
                request_id = %request_id,
                path = %route.location,
                view = route.view.name(),
                "Serving view"
            );
            let page = render_shell(&state.base, Some(route.view.as_ref()));
            (
                (StatusCode::OK, Html(page)).into_response(),
                ResolutionOutcome::View,
                route.matched,
            )
        }
    }
}

fn not_found(state: &AppState) -> Response {
    (StatusCode::NOT_FOUND, Html(render_shell(&state.base, None))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app;
    use crate::routing::MatchOptions;
    use tower::ServiceExt;

    fn server(base: &str) -> HttpServer {
        let mut config = AppConfig::default();
        config.history.base = base.to_string();
        let router = Arc::new(app::build_router(MatchOptions::default()).unwrap());
        HttpServer::new(config, router)
    }

    async fn get(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_redirect_response() {
        let res = get(server("").app(), "/").await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(res.headers()[header::LOCATION], "/sign");
        assert!(res.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_view_response() {
        let res = get(server("").app(), "/convert").await;
        assert_eq!(res.status(), StatusCode::OK);

        let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains(r#"data-view="convert-document""#));
    }

    #[tokio::test]
    async fn test_outside_base_is_not_found() {
        let res = get(server("/app").app(), "/sign").await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_network_path_is_bad_request() {
        let res = get(server("").app(), "//evil.example/sign").await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert!(res.headers().get(header::LOCATION).is_none());
    }

    #[test]
    fn test_resolve_page_outcomes() {
        let server = server("");
        let router = Arc::new(app::build_router(MatchOptions::default()).unwrap());
        let state = AppState {
            router,
            base: normalize_base(&server.config().history.base).into(),
        };

        let (_, outcome, route) = resolve_page(&state, "/", "t");
        assert_eq!(outcome, ResolutionOutcome::Redirect);
        assert_eq!(route, "/sign");

        let (_, outcome, _) = resolve_page(&state, "/sign", "t");
        assert_eq!(outcome, ResolutionOutcome::View);

        let (_, outcome, route) = resolve_page(&state, "/nope", "t");
        assert_eq!(outcome, ResolutionOutcome::Unmatched);
        assert_eq!(route, "none");

        let (res, outcome, route) = resolve_page(&state, "/\\evil.example/convert", "t");
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(outcome, ResolutionOutcome::Invalid);
        assert_eq!(route, "none");
    }
}
