//! Metrics collection and exposition.
//!
//! # Metrics
//! - `fusion_rpc_requests_total` (counter): calls by operation, outcome
//! - `fusion_rpc_request_duration_seconds` (histogram): latency by operation
//! - `fusion_evm_clients` (gauge): EVM chains connected at startup
//! - `fusion_kv_entries` (gauge): entries per store
//! - `fusion_version_conflicts_total` (counter): rejected duplicate writes
//!
//! Without an installed recorder every call here is a no-op, which is what
//! unit tests rely on.

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its scrape listener.
///
/// Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one served operation.
pub fn record_rpc(operation: &'static str, outcome: &'static str, start: Instant) {
    counter!(
        "fusion_rpc_requests_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
    histogram!("fusion_rpc_request_duration_seconds", "operation" => operation)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_evm_clients(count: usize) {
    gauge!("fusion_evm_clients").set(count as f64);
}

pub fn record_kv_entries(store: &'static str, count: usize) {
    gauge!("fusion_kv_entries", "store" => store).set(count as f64);
}

pub fn record_version_conflict(store: &'static str) {
    counter!("fusion_version_conflicts_total", "store" => store).increment(1);
}
