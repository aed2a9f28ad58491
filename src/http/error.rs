//! Mapping of handler failures to HTTP responses.
//!
//! Missing input is the caller's problem and gets a plain-text 400.
//! Everything else is reported as `500 {"error": "<message>"}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No data provided")]
    MissingData,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("template error: {0}")]
    Render(#[from] askama::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MissingData => {
                (StatusCode::BAD_REQUEST, "No data provided").into_response()
            }
            other => {
                tracing::error!(error = %other, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "error": other.to_string() })),
                )
                    .into_response()
            }
        }
    }
}
