use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::{sync::OnceLock, time::Instant};

const LATENCY_BUCKETS: &[f64] = &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Returns the handle of the process-wide Prometheus recorder, installing it on first use.
pub fn metrics_handle() -> PrometheusHandle {
    PROMETHEUS_HANDLE
        .get_or_init(|| {
            let installed = PrometheusBuilder::new()
                .set_buckets(LATENCY_BUCKETS)
                .and_then(|builder| builder.install_recorder());

            match installed {
                Ok(handle) => handle,
                Err(e) => {
                    // Metrics still render, just without anything recorded
                    tracing::warn!("Failed to install Prometheus recorder: {}", e);
                    PrometheusBuilder::new().build_recorder().handle()
                }
            }
        })
        .clone()
}

/// Records request count, latency, errors and in-flight requests per route template.
pub async fn track_http_metrics(req: Request<Body>, next: Next) -> Response {
    let method = req.method().to_string();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());

    gauge!("http_requests_active").increment(1.0);
    let started = Instant::now();

    let response = next.run(req).await;

    let elapsed = started.elapsed().as_secs_f64();
    gauge!("http_requests_active").decrement(1.0);

    let status = response.status();
    let status_label = status.as_u16().to_string();

    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status_label.clone()
    )
    .increment(1);
    histogram!(
        "http_request_duration_seconds",
        "method" => method.clone(),
        "path" => path.clone()
    )
    .record(elapsed);

    if status.is_client_error() || status.is_server_error() {
        counter!(
            "http_errors_total",
            "method" => method,
            "path" => path,
            "status" => status_label
        )
        .increment(1);
    }

    response
}
