//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by verb, status
//! - `gateway_request_duration_seconds` (histogram): latency by verb
//! - `gateway_storage_calls_total` (counter): storage calls by service, verb, outcome
//! - `gateway_storage_call_duration_seconds` (histogram): storage latency
//!
//! Recording is a no-op until a recorder is installed, so tests can call
//! these functions freely.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and start its scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one handled gateway request.
pub fn record_request(verb: &str, status: u16, start_time: Instant) {
    counter!(
        "gateway_requests_total",
        "verb" => verb.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("gateway_request_duration_seconds", "verb" => verb.to_string())
        .record(start_time.elapsed().as_secs_f64());
}

/// Record one call to a storage service.
pub fn record_storage_call(service: &str, verb: &str, success: bool, start_time: Instant) {
    let outcome = if success { "success" } else { "failure" };
    counter!(
        "gateway_storage_calls_total",
        "service" => service.to_string(),
        "verb" => verb.to_string(),
        "outcome" => outcome
    )
    .increment(1);
    histogram!(
        "gateway_storage_call_duration_seconds",
        "service" => service.to_string(),
        "verb" => verb.to_string()
    )
    .record(start_time.elapsed().as_secs_f64());
}
