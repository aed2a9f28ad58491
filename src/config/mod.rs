//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! service defaults (ServiceConfig::reader / ::writer)
//!     → loader.rs (optional TOML file, then MYSQL_* / POD_NAME env)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//!     → shared via Arc to handlers
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    DatabaseConfig, ListenerConfig, LogFormat, ObservabilityConfig, RetryConfig, ServiceConfig,
    TimeoutConfig,
};
pub use validation::ValidationError;
