//! Request identification.
//!
//! # Responsibilities
//! - Name the request ID header
//! - Read the ID back out of a request for logs and spans
//!
//! # Design Decisions
//! - ID assigned as early as possible (outermost layer) and echoed on the response
//! - An incoming `x-request-id` is kept, not overwritten

use axum::http::{HeaderMap, HeaderName};

pub use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

/// Header carrying the request ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Access to the request ID on anything carrying headers.
pub trait RequestIdExt {
    /// The request ID, or `unknown` when absent or not valid UTF-8.
    fn request_id(&self) -> &str;
}

impl RequestIdExt for HeaderMap {
    fn request_id(&self) -> &str {
        self.get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
    }
}
