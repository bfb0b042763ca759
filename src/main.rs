//! docdesk server
//!
//! Serves the single-page application in history mode.
//!
//! ```text
//!     GET /            ──▶ 302 Location: /sign
//!     GET /sign        ──▶ 200 shell, mounts sign-pdf
//!     GET /convert     ──▶ 200 shell, mounts convert-document
//!     GET /elsewhere   ──▶ 404 shell, nothing mounted
//!     GET /_status     ──▶ JSON version/status
//!     GET /_routes     ──▶ JSON route table
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use docdesk::config::{load_config, AppConfig};
use docdesk::lifecycle::{signals, Shutdown};
use docdesk::observability::{logging, metrics};
use docdesk::{app, HttpServer};

#[derive(Parser)]
#[command(name = "docdesk")]
#[command(about = "Serve the docdesk single-page application", long_about = None)]
struct Args {
    /// Path to a TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };

    logging::init_logging(&config.observability)?;
    tracing::info!("docdesk v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        base = %config.history.base,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let router = Arc::new(app::build_router(config.routing)?);
    tracing::info!(routes = router.routes().count(), "Route table ready");

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(signals::shutdown_on_ctrl_c(shutdown));

    let server = HttpServer::new(config, router);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
