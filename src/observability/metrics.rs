//! Metrics collection and exposition.
//!
//! # Metrics
//! - `api_hub_requests_total` (counter): requests by method, status, service
//! - `api_hub_request_duration_seconds` (histogram): time to response headers
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   recorder every call is a no-op
//! - Prometheus exposition is opt-in via `observability.metrics_enabled`

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder with its own scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one handled request.
pub fn record_request(method: &str, status: u16, service: &str, start: Instant) {
    metrics::counter!(
        "api_hub_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "service" => service.to_string()
    )
    .increment(1);

    metrics::histogram!(
        "api_hub_request_duration_seconds",
        "method" => method.to_string(),
        "service" => service.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}
