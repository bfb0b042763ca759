//! The application's route table.

use std::sync::Arc;

use crate::routing::{MatchOptions, RouteError, RouteRecord, Router};
use crate::views::{ConvertDocumentView, SignPdfView};

/// Route records in declaration order.
pub fn routes() -> Vec<RouteRecord> {
    vec![
        RouteRecord::redirect("/", "/sign"),
        RouteRecord::view("/sign", Arc::new(SignPdfView)),
        RouteRecord::view("/convert", Arc::new(ConvertDocumentView)),
    ]
}

/// Build the router once at startup. Callers share it via `Arc`.
pub fn build_router(options: MatchOptions) -> Result<Router, RouteError> {
    Router::with_options(routes(), options)
}
