use axum::{extract::State, http::header, response::IntoResponse};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};
use std::sync::Arc;

use crate::AppState;

const LATENCY_BUCKETS: &[f64] = &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];

pub struct MetricsState {
    pub handle: PrometheusHandle,
}

fn builder() -> Result<PrometheusBuilder, BuildError> {
    PrometheusBuilder::new().set_buckets_for_metric(
        Matcher::Full("http_request_duration_seconds".to_string()),
        LATENCY_BUCKETS,
    )
}

/// Installs the process-wide Prometheus recorder
pub fn setup_metrics_recorder() -> Result<MetricsState, BuildError> {
    let handle = builder()?.install_recorder()?;
    Ok(MetricsState { handle })
}

/// A recorder that is not installed globally; handlers can render it but
/// macro-recorded metrics do not reach it
#[cfg(test)]
pub fn detached_metrics_state() -> Result<MetricsState, BuildError> {
    let recorder = builder()?.build_recorder();
    Ok(MetricsState {
        handle: recorder.handle(),
    })
}

/// GET /metrics
#[utoipa::path(
    get,
    path = "/metrics",
    responses(
        (status = 200, description = "Prometheus text exposition", content_type = "text/plain")
    ),
    tag = "operations"
)]
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.handle.render(),
    )
}
