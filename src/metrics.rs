//! Prometheus metrics for request and store latency.
//!
//! This module provides metrics for:
//! - HTTP requests by method, matched route and status
//! - HTTP request latency
//! - Store statement latency and failures

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::debug;

// === Metric Name Constants ===

/// HTTP requests counter metric name.
pub const METRIC_HTTP_REQUESTS: &str = "http_requests_total";
/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";
/// Store statement latency metric name.
pub const METRIC_STORE_QUERY_LATENCY: &str = "store_query_latency_ms";
/// Store failures counter metric name.
pub const METRIC_STORE_ERRORS: &str = "store_errors_total";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_counter!(METRIC_HTTP_REQUESTS, "Total number of HTTP requests handled");
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );
    describe_histogram!(
        METRIC_STORE_QUERY_LATENCY,
        "Database statement latency in milliseconds"
    );
    describe_counter!(METRIC_STORE_ERRORS, "Total number of failed database statements");

    debug!("Metrics initialized");
}

/// Install the Prometheus recorder and return the handle used to render `/metrics`.
pub fn install_recorder() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Record a finished HTTP request.
pub fn record_http_request(start: Instant, method: &str, route: &str, status: u16) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    counter!(
        METRIC_HTTP_REQUESTS,
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "method" => method.to_string(),
        "route" => route.to_string()
    )
    .record(latency_ms);
}

/// Increment failed store statements counter.
pub fn inc_store_errors(operation: &'static str) {
    counter!(METRIC_STORE_ERRORS, "operation" => operation).increment(1);
}

/// Middleware recording count and latency of every routed request.
///
/// Installed as a route layer, so it only sees requests that matched a
/// route and the route label is always the matched path template.
pub async fn track_http(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_default();

    let response = next.run(request).await;
    record_http_request(start, &method, &route, response.status().as_u16());
    response
}

/// RAII guard for timing store statements.
/// Automatically records latency when dropped.
pub struct LatencyTimer {
    start: Instant,
    operation: &'static str,
}

impl LatencyTimer {
    /// Create a new latency timer for the given store operation.
    pub fn new(operation: &'static str) -> Self {
        Self {
            start: Instant::now(),
            operation,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        let latency_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        histogram!(METRIC_STORE_QUERY_LATENCY, "operation" => self.operation).record(latency_ms);
    }
}

/// Create a latency timer for a store statement.
pub fn timer_store_query(operation: &'static str) -> LatencyTimer {
    LatencyTimer::new(operation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn latency_timer_measures_time() {
        let timer = timer_store_query("fetch_all");
        sleep(Duration::from_millis(10));
        let elapsed = timer.elapsed_ms();
        assert!(elapsed >= 9.0); // Allow some tolerance
    }
}
