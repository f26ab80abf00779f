//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_uploads_total` (counter): uploads by outcome
//! - `gateway_upstream_calls_total` (counter): Brain calls by method, outcome
//! - `gateway_upstream_call_duration_seconds` (histogram): Brain call latency
//! - `gateway_chat_fallbacks_total` (counter): chat turns answered with the fallback
//! - `gateway_active_sessions` (gauge): open chat sessions
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record the outcome of one upload request.
pub fn record_upload(outcome: &'static str) {
    counter!("gateway_uploads_total", "outcome" => outcome).increment(1);
}

/// Record one call to the Brain.
pub fn record_upstream_call(method: &'static str, outcome: &'static str, start: Instant) {
    counter!("gateway_upstream_calls_total", "method" => method, "outcome" => outcome).increment(1);
    histogram!("gateway_upstream_call_duration_seconds", "method" => method)
        .record(start.elapsed().as_secs_f64());
}

/// Record a chat turn answered with the fallback text.
pub fn record_chat_fallback() {
    counter!("gateway_chat_fallbacks_total").increment(1);
}

/// Publish the number of open chat sessions.
pub fn set_active_sessions(count: u64) {
    gauge!("gateway_active_sessions").set(count as f64);
}
