//! docdesk: route table and HTTP front end for the PDF signing and
//! document conversion single-page application.

pub mod app;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod views;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{Navigator, Resolution, Router};
