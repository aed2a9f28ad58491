use std::time::Instant;

use askama::Template;
use axum::{extract::State, response::Html, Json};

use crate::http::{render, ApiError, AppState};
use crate::observability::metrics;
use crate::resilience::with_retry;
use crate::store::Record;

#[derive(Template)]
#[template(path = "reader_rows.html")]
struct RowsTemplate<'a> {
    rows: Vec<Record>,
    pod_name: &'a str,
}

/// Read every record, newest first, and update the read metrics.
async fn fetch_rows(state: &AppState) -> Result<Vec<Record>, ApiError> {
    let store = state.store.as_ref();
    let (rows, elapsed) = with_retry(&state.config.retries, "list", move || async move {
        let start = Instant::now();
        let rows = store.list_newest_first().await?;
        Ok((rows, start.elapsed()))
    })
    .await?;

    metrics::record_read(elapsed, rows.len());
    tracing::debug!(rows = rows.len(), elapsed_ms = elapsed.as_secs_f64() * 1000.0, "Read records");
    Ok(rows)
}

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let rows = fetch_rows(&state).await?;
    render(RowsTemplate {
        rows,
        pod_name: &state.config.pod_name,
    })
}

pub async fn api_rows(State(state): State<AppState>) -> Result<Json<Vec<Record>>, ApiError> {
    Ok(Json(fetch_rows(&state).await?))
}
