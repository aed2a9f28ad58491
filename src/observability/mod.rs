//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and the store layer produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (summaries, gauge, request counter)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → Prometheus scrape of GET /metrics
//! ```

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
