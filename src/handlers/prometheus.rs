use axum::{
    http::{header, HeaderValue, StatusCode},
    response::IntoResponse,
    Extension,
};
use metrics_exporter_prometheus::PrometheusHandle;

/// Prometheus text exposition of the recorded metrics
pub async fn metrics_endpoint(Extension(handle): Extension<PrometheusHandle>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; version=0.0.4"),
        )],
        handle.render(),
    )
}
