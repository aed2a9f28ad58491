//! Writer service: manual data entry into `data_table`.
//!
//! # Routes
//! - `GET /` form with a single required `data` field
//! - `POST /update` insert the submitted value, then redirect to `/`

pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};

use crate::http::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/update", post(handlers::update))
        .with_state(state)
}
