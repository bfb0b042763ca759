//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Requested path ("/", "/sign?doc=1", ...)
//!     → location.rs (parse & normalise)
//!     → router.rs (route lookup, redirect chain)
//!     → matcher.rs (evaluate path match)
//!     → Return: Matched(view) or Unmatched
//!
//! Route Compilation (at startup):
//!     RouteRecord[]
//!     → Compile matchers
//!     → Validate (unique paths, redirects land on a view)
//!     → Freeze as immutable Router
//!
//! Programmatic navigation (per session):
//!     navigator.rs → router.rs → history.rs (push / replace / go)
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Deterministic: same input always resolves the same way
//! - First match wins (declaration order)
//! - No catch-all: unmatched paths are reported, not rewritten

pub mod history;
pub mod location;
pub mod matcher;
pub mod navigator;
pub mod route;
pub mod router;

pub use history::{History, MemoryHistory};
pub use location::Location;
pub use matcher::MatchOptions;
pub use navigator::{NavigationError, Navigator};
pub use route::{RouteError, RouteRecord, RouteTarget};
pub use router::{Resolution, ResolvedRoute, Router};
