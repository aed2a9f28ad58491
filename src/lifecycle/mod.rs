//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Logging → Metrics → Store pool → Listener
//!
//! Shutdown:
//!     SIGTERM/SIGINT (signals.rs) → Shutdown::trigger (shutdown.rs)
//!     → server stops accepting, drains in-flight requests → pool closed
//! ```

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use signals::wait_for_termination;
