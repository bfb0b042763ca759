//! HTTP front end.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (assign request ID)
//!     → strip history base
//!     → routing::Router (resolve path)
//!     → shell.rs (render shell page) | 302 redirect | 404 shell
//!     → Send to client
//! ```

pub mod request;
pub mod server;
pub mod shell;
pub mod status;

pub use request::{RequestIdExt, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
