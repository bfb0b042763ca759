//! Metrics collection and exposition.
//!
//! # Metrics
//! - `docdesk_requests_total` (counter): requests by method, status, route
//! - `docdesk_request_duration_seconds` (histogram): latency distribution
//! - `docdesk_resolutions_total` (counter): resolution outcomes
//!
//! # Design Decisions
//! - Recording is a no-op until a recorder is installed (tests, CLI)
//! - Route label is the matched record path, or `none`

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// How a request path was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionOutcome {
    View,
    Redirect,
    Unmatched,
    Invalid,
}

impl ResolutionOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            ResolutionOutcome::View => "view",
            ResolutionOutcome::Redirect => "redirect",
            ResolutionOutcome::Unmatched => "unmatched",
            ResolutionOutcome::Invalid => "invalid",
        }
    }
}

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record a finished request.
pub fn record_request(method: &str, status: u16, route: &str, start: Instant) {
    metrics::counter!(
        "docdesk_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "route" => route.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "docdesk_request_duration_seconds",
        "method" => method.to_string(),
        "route" => route.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record how a path resolved.
pub fn record_resolution(outcome: ResolutionOutcome) {
    metrics::counter!("docdesk_resolutions_total", "outcome" => outcome.as_str()).increment(1);
}
