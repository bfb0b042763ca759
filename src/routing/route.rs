//! Route records and routing errors.

use thiserror::Error;

use crate::views::ViewRef;

/// What a route does once matched.
#[derive(Debug, Clone)]
pub enum RouteTarget {
    /// Render a view component.
    View(ViewRef),
    /// Resolve another path instead.
    Redirect(String),
}

/// A single entry of the route table.
#[derive(Debug, Clone)]
pub struct RouteRecord {
    path: String,
    target: RouteTarget,
}

impl RouteRecord {
    /// A route rendering `view` at `path`.
    pub fn view(path: impl Into<String>, view: ViewRef) -> Self {
        Self {
            path: path.into(),
            target: RouteTarget::View(view),
        }
    }

    /// A route sending `path` on to `to`.
    pub fn redirect(path: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            target: RouteTarget::Redirect(to.into()),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn target(&self) -> &RouteTarget {
        &self.target
    }

    /// The view this record renders, if it is not a redirect.
    pub fn view_ref(&self) -> Option<&ViewRef> {
        match &self.target {
            RouteTarget::View(view) => Some(view),
            RouteTarget::Redirect(_) => None,
        }
    }

    /// The redirect target, if this record is a redirect.
    pub fn redirect_target(&self) -> Option<&str> {
        match &self.target {
            RouteTarget::View(_) => None,
            RouteTarget::Redirect(to) => Some(to),
        }
    }
}

/// Errors raised while building a route table or resolving a path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("invalid path `{input}`")]
    InvalidPath { input: String },

    #[error("route path `{path}` must start with `/`")]
    NotAbsolute { path: String },

    #[error("route path `{path}` duplicates `{existing}`")]
    DuplicatePath { path: String, existing: String },

    #[error("route `{from}` redirects to `{to}`, which matches no route")]
    DanglingRedirect { from: String, to: String },

    #[error("redirect loop starting at `{path}`")]
    RedirectLoop { path: String },
}
