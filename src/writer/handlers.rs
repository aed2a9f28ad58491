use std::time::Instant;

use askama::Template;
use axum::{
    extract::{rejection::FormRejection, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;

use crate::http::{render, ApiError, AppState};
use crate::observability::metrics;
use crate::resilience::with_retry;
use crate::store::MAX_DATA_LEN;

#[derive(Template)]
#[template(path = "writer_form.html")]
struct FormTemplate {
    max_len: usize,
    metrics_enabled: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateForm {
    #[serde(default)]
    pub data: Option<String>,
}

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    render(FormTemplate {
        max_len: MAX_DATA_LEN,
        metrics_enabled: state.config.observability.metrics_enabled,
    })
}

/// Insert the submitted value and send the caller back to the form.
///
/// Only reaching the store is retried: `ensure_table` is idempotent, so it
/// runs under the retry policy. The insert itself runs exactly once, since a
/// failure after COMMIT may already have stored the row.
pub async fn update(
    State(state): State<AppState>,
    form: Result<Form<UpdateForm>, FormRejection>,
) -> Result<Response, ApiError> {
    let data = match form {
        Ok(Form(UpdateForm { data: Some(data) })) if !data.is_empty() => data,
        Ok(_) => return Err(ApiError::MissingData),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable form body");
            return Err(ApiError::MissingData);
        }
    };

    let store = state.store.as_ref();
    with_retry(&state.config.retries, "ensure_table", || store.ensure_table()).await?;

    let start = Instant::now();
    let id = store.insert(&data).await?;
    let elapsed = start.elapsed();

    metrics::record_write(elapsed);
    tracing::info!(
        id,
        data = %data,
        elapsed_ms = elapsed.as_secs_f64() * 1000.0,
        "Inserted record"
    );

    Ok((StatusCode::FOUND, [(header::LOCATION, "/")]).into_response())
}
