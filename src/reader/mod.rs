//! Reader service: displays the contents of `data_table`.
//!
//! # Routes
//! - `GET /` HTML table, newest record first
//! - `GET /api/rows` the same rows as a JSON array

pub mod handlers;

use axum::{routing::get, Router};

use crate::http::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/rows", get(handlers::api_rows))
        .with_state(state)
}
