//! Prometheus metrics for request tracking and registry activity.
//!
//! This module provides:
//! - HTTP request counters and latency histograms
//! - Counters for registry mutations and rejected input
//! - A gauge tracking the registry size

use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

// === Metric Name Constants ===

/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";
/// HTTP requests counter metric name.
pub const METRIC_HTTP_REQUESTS: &str = "http_requests_total";
/// Users added counter metric name.
pub const METRIC_USERS_ADDED: &str = "users_added_total";
/// Users updated counter metric name.
pub const METRIC_USERS_UPDATED: &str = "users_updated_total";
/// Users removed counter metric name.
pub const METRIC_USERS_REMOVED: &str = "users_removed_total";
/// Rejected records counter metric name.
pub const METRIC_VALIDATION_FAILURES: &str = "user_validation_failures_total";
/// Registry size gauge metric name.
pub const METRIC_USERS_REGISTERED: &str = "users_registered";

/// Install the Prometheus recorder and register metric descriptions.
/// Call this once at startup; the handle renders the `/metrics` body.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Initialize all metric descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );
    describe_counter!(METRIC_HTTP_REQUESTS, "Total number of HTTP requests");
    describe_counter!(METRIC_USERS_ADDED, "Total number of users added");
    describe_counter!(METRIC_USERS_UPDATED, "Total number of users replaced");
    describe_counter!(METRIC_USERS_REMOVED, "Total number of users removed");
    describe_counter!(
        METRIC_VALIDATION_FAILURES,
        "Total number of user records rejected by validation"
    );
    describe_gauge!(METRIC_USERS_REGISTERED, "Number of users currently registered");

    debug!("Metrics initialized");
}

/// Record HTTP request latency.
pub fn record_http_latency(start: Instant, endpoint: &str) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_HTTP_REQUEST_LATENCY, "endpoint" => endpoint.to_string()).record(latency_ms);
}

/// Increment HTTP requests counter.
pub fn inc_http_requests(endpoint: &str, method: &str, status: u16) {
    counter!(
        METRIC_HTTP_REQUESTS,
        "endpoint" => endpoint.to_string(),
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Increment users added counter.
pub fn inc_users_added() {
    counter!(METRIC_USERS_ADDED).increment(1);
}

/// Increment users updated counter.
pub fn inc_users_updated() {
    counter!(METRIC_USERS_UPDATED).increment(1);
}

/// Increment users removed counter.
pub fn inc_users_removed() {
    counter!(METRIC_USERS_REMOVED).increment(1);
}

/// Increment validation failures counter.
pub fn inc_validation_failures() {
    counter!(METRIC_VALIDATION_FAILURES).increment(1);
}

/// Set the registry size gauge.
pub fn set_users_registered(count: usize) {
    gauge!(METRIC_USERS_REGISTERED).set(count as f64);
}

/// Axum middleware recording per-route request count and latency.
pub async fn track_http(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let endpoint = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let response = next.run(req).await;

    record_http_latency(start, &endpoint);
    inc_http_requests(&endpoint, &method, response.status().as_u16());
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_without_recorder_is_a_noop() {
        inc_users_added();
        set_users_registered(3);
        record_http_latency(Instant::now(), "/users");
    }
}
