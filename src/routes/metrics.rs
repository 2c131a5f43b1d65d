//! Prometheus metrics endpoint
//!
//! Exposes application metrics in Prometheus format for monitoring.

use axum::response::IntoResponse;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;

use crate::gemini::types::UsageMetadata;

/// Global Prometheus handle for metrics export
static PROMETHEUS_HANDLE: Lazy<PrometheusHandle> = Lazy::new(|| {
    PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus recorder")
});

/// Initialize metrics (call once at startup)
pub fn init_metrics() {
    // Force initialization of the lazy static
    let _ = &*PROMETHEUS_HANDLE;

    register_metrics();
}

fn register_metrics() {
    metrics::describe_counter!(
        "parrot_requests_total",
        "Total number of requests processed"
    );
    metrics::describe_counter!(
        "parrot_tokens_processed_total",
        "Total tokens reported by the model provider"
    );
    metrics::describe_histogram!(
        "parrot_request_duration_seconds",
        "Request duration in seconds"
    );
}

/// Prometheus metrics endpoint handler
///
/// Returns metrics in Prometheus text format for scraping.
pub async fn prometheus_metrics() -> impl IntoResponse {
    PROMETHEUS_HANDLE.render()
}

/// Record a finished request
pub fn record_request(endpoint: &str, status: &str, duration_secs: f64) {
    metrics::counter!(
        "parrot_requests_total",
        "endpoint" => endpoint.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("parrot_request_duration_seconds", "endpoint" => endpoint.to_string())
        .record(duration_secs);
}

/// Record tokens processed
pub fn record_tokens(token_type: &str, count: u64, model: &str) {
    metrics::counter!(
        "parrot_tokens_processed_total",
        "type" => token_type.to_string(),
        "model" => model.to_string()
    )
    .increment(count);
}

/// Record the prompt and completion token counts of one provider call
pub fn record_usage(usage: &UsageMetadata, model: &str) {
    record_tokens("prompt", usage.prompt_token_count, model);
    record_tokens("completion", usage.candidates_token_count, model);
}
