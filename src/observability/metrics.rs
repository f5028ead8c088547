//! Metrics collection and exposition.
//!
//! # Metrics
//! - `defake_classifier_attempts_total` (counter): outbound attempts by outcome
//! - `defake_classifications_total` (counter): finished classifications by outcome
//! - `defake_classification_duration_seconds` (histogram): retries included
//! - `defake_classification_attempts` (histogram): attempts per classification
//! - `defake_http_requests_total` (counter): inbound requests by method, route, status
//! - `defake_http_request_duration_seconds` (histogram): inbound latency by route
//!
//! Recording is a no-op until a recorder is installed with [`init_metrics`].

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// One outbound attempt finished.
pub fn record_attempt(outcome: &'static str) {
    counter!("defake_classifier_attempts_total", "outcome" => outcome).increment(1);
}

/// A classification finished (successfully or not).
pub fn record_classification(outcome: &'static str, attempts: u32, start: Instant) {
    counter!("defake_classifications_total", "outcome" => outcome).increment(1);
    histogram!("defake_classification_duration_seconds").record(start.elapsed().as_secs_f64());
    histogram!("defake_classification_attempts").record(f64::from(attempts));
}

/// An inbound request finished.
pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    counter!(
        "defake_http_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("defake_http_request_duration_seconds", "route" => route.to_string())
        .record(start.elapsed().as_secs_f64());
}
