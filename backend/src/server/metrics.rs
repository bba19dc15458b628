//! Prometheus middleware construction for the `metrics` feature.

use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};

const METRICS_NAMESPACE: &str = "deenify";
const METRICS_ENDPOINT: &str = "/metrics";

/// Build the request metrics middleware and its `/metrics` endpoint.
///
/// # Errors
/// Returns [`std::io::Error`] when metric registration fails.
pub(crate) fn build_metrics() -> std::io::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new(METRICS_NAMESPACE)
        .endpoint(METRICS_ENDPOINT)
        .build()
        .map_err(|err| std::io::Error::other(format!("metrics registration failed: {err}")))
}
