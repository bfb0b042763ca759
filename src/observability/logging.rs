//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once per process
//! - Pick the log filter from `RUST_LOG`, falling back to config
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Human-readable fmt layer on stdout
//! - Double initialization is reported, not fatal

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Install the global subscriber.
pub fn init_logging(config: &ObservabilityConfig) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(filter_for(config))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
}

/// `RUST_LOG` wins; otherwise the configured level, scoped like the
/// default directives.
fn filter_for(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(&config.log_level)
            .unwrap_or_else(|_| EnvFilter::new("docdesk=info,tower_http=info"))
    })
}
