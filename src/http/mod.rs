//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID on span and response)
//!     → reader / writer handlers
//!     → error.rs (400 text / 500 JSON on failure)
//! ```

pub mod error;
pub mod health;
pub mod request;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use request::X_REQUEST_ID;
pub use server::{HttpServer, ServiceKind};
pub use state::AppState;

use askama::Template;
use axum::response::Html;

/// Render an Askama template into an HTML response.
pub fn render<T: Template>(template: T) -> Result<Html<String>, ApiError> {
    Ok(Html(template.render()?))
}
