//! Metrics collection and exposition.
//!
//! # Metrics
//! - `mysql_write_time_seconds` (summary): time spent writing to MySQL
//! - `mysql_read_time_seconds` (summary): time spent reading from MySQL
//! - `row_count` (gauge): rows returned by the latest read of `data_table`
//! - `http_requests_total` (counter): requests by service, route, status
//!
//! # Design Decisions
//! - One Prometheus recorder per process, installed on first use
//! - Histograms are exported as summaries (quantiles + `_sum` + `_count`)
//! - Exposed only through the `/metrics` route of the service router

use std::sync::OnceLock;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{MatchedPath, State},
    http::{header, Request},
    middleware::Next,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use metrics::{describe_counter, describe_gauge, describe_histogram, Unit};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tokio::sync::broadcast;

pub const WRITE_TIME: &str = "mysql_write_time_seconds";
pub const READ_TIME: &str = "mysql_read_time_seconds";
pub const ROW_COUNT: &str = "row_count";
pub const HTTP_REQUESTS: &str = "http_requests_total";

static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the global Prometheus recorder, or return the one already installed.
pub fn install() -> PrometheusHandle {
    HANDLE
        .get_or_init(|| {
            let recorder = PrometheusBuilder::new().build_recorder();
            let handle = recorder.handle();
            if let Err(e) = metrics::set_global_recorder(recorder) {
                tracing::warn!(error = %e, "Another metrics recorder is already installed");
            }
            describe();
            handle
        })
        .clone()
}

fn describe() {
    describe_histogram!(WRITE_TIME, Unit::Seconds, "Time spent writing to MySQL");
    describe_histogram!(READ_TIME, Unit::Seconds, "Time spent reading from MySQL");
    describe_gauge!(ROW_COUNT, Unit::Count, "Number of rows in data_table");
    describe_counter!(HTTP_REQUESTS, Unit::Count, "HTTP requests handled");
}

pub fn record_write(elapsed: Duration) {
    metrics::histogram!(WRITE_TIME).record(elapsed.as_secs_f64());
}

pub fn record_read(elapsed: Duration, rows: usize) {
    metrics::histogram!(READ_TIME).record(elapsed.as_secs_f64());
    metrics::gauge!(ROW_COUNT).set(rows as f64);
}

pub fn record_request(service: &'static str, route: String, status: u16) {
    metrics::counter!(
        HTTP_REQUESTS,
        "service" => service,
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);
}

/// Middleware counting every response by matched route and status.
pub async fn track_requests(
    State(service): State<&'static str>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());
    let start = Instant::now();

    let response = next.run(request).await;

    tracing::debug!(
        service,
        route = %route,
        status = response.status().as_u16(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Request handled"
    );
    record_request(service, route, response.status().as_u16());
    response
}

async fn render(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        handle.render(),
    )
}

/// Router serving the text exposition at `/metrics`.
pub fn router(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(render)).with_state(handle)
}

/// Drain summary buckets periodically until shutdown.
pub async fn run_upkeep(handle: PrometheusHandle, interval: Duration, mut shutdown: broadcast::Receiver<()>) {
    let mut ticker = tokio::time::interval(interval);
    loop {
        tokio::select! {
            _ = ticker.tick() => handle.run_upkeep(),
            _ = shutdown.recv() => {
                tracing::debug!("Metrics upkeep stopped");
                break;
            }
        }
    }
}
