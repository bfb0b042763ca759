//! View components mounted by the router.
//!
//! Views are opaque to the routing layer: the router only needs a stable
//! name to mount and a title for the document head. What a view does once
//! mounted (signing, conversion) lives elsewhere.

mod convert;
mod sign;

use std::fmt;
use std::sync::Arc;

pub use convert::ConvertDocumentView;
pub use sign::SignPdfView;

/// A unit of UI presentation a route can render.
pub trait View: fmt::Debug + Send + Sync {
    /// Stable identifier used as the mount key (e.g. `sign-pdf`).
    fn name(&self) -> &'static str;

    /// Human readable title.
    fn title(&self) -> &'static str;
}

/// Shared handle to a view component.
pub type ViewRef = Arc<dyn View>;
