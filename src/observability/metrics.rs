//! Metrics collection and exposition.
//!
//! # Metrics
//! - `catalog_http_requests_total` (counter): requests by method, path, status
//! - `catalog_http_request_duration_seconds` (histogram): latency distribution
//! - `catalog_products` (gauge): current number of stored products

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Install the Prometheus recorder globally and spawn its scrape listener.
///
/// Must be called from within a Tokio runtime. Values recorded before this
/// call are lost.
pub fn init_metrics(addr: SocketAddr) -> Result<PrometheusHandle, BuildError> {
    let (recorder, exporter) = PrometheusBuilder::new().with_http_listener(addr).build()?;
    let handle = recorder.handle();
    tokio::spawn(exporter);
    metrics::set_global_recorder(recorder)?;

    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(handle)
}

/// Record one completed HTTP request.
pub fn record_request(method: &str, path: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];
    metrics::counter!("catalog_http_requests_total", &labels).increment(1);
    metrics::histogram!("catalog_http_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}

/// Publish the current catalog size.
pub fn record_catalog_size(len: usize) {
    metrics::gauge!("catalog_products").set(len as f64);
}
