//! Metrics collection and exposition.
//!
//! # Metrics
//! - `spa_route_resolutions_total` (counter): rendered locations by route
//! - `spa_route_not_found_total` (counter): locations without a route
//! - `spa_render_duration_seconds` (histogram): document render latency
//!
//! # Design Decisions
//! - Prometheus exporter is opt-in (`observability.metrics_enabled`)
//! - Labels limited to the route name (bounded cardinality)

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint. Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_resolution(route: &str) {
    metrics::counter!("spa_route_resolutions_total", "route" => route.to_string()).increment(1);
}

pub fn record_not_found() {
    metrics::counter!("spa_route_not_found_total").increment(1);
}

pub fn record_render(start: Instant) {
    metrics::histogram!("spa_render_duration_seconds").record(start.elapsed().as_secs_f64());
}
