//! Metrics collection and exposition.
//!
//! # Metrics
//! - `krystal_requests_total` (counter): requests by method, status, route template
//! - `krystal_request_duration_seconds` (histogram): dispatch latency
//! - `krystal_route_misses_total` (counter): requests served by the default route
//! - `krystal_redirects_total` (counter): permanent redirects issued
//! - `krystal_modules_loaded` (gauge): modules loaded by the last bootstrap
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade and is a no-op until an
//!   exporter is installed
//! - Route labels use the template, never the raw path, to bound cardinality

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Label used when no route template matched.
pub const UNMATCHED_ROUTE: &str = "none";

/// Start the Prometheus scrape endpoint. Requires a running Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(method: &str, status: u16, route: &str, start: Instant) {
    ::metrics::counter!(
        "krystal_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "route" => route.to_string()
    )
    .increment(1);
    ::metrics::histogram!("krystal_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_route_miss() {
    ::metrics::counter!("krystal_route_misses_total").increment(1);
}

pub fn record_redirect() {
    ::metrics::counter!("krystal_redirects_total").increment(1);
}

pub fn record_modules_loaded(count: usize) {
    ::metrics::gauge!("krystal_modules_loaded").set(count as f64);
}
