//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Handler needs the store:
//!     → retries.rs (run the store call, classify the failure)
//!     → On transient failure: backoff.rs (exponential delay + jitter)
//!     → Deadline reached: StoreError::DeadlineExceeded
//! ```
//!
//! # Design Decisions
//! - Every store call has a deadline
//! - Only connection-level failures are retried
//! - Reader and writer share one mechanism and differ only in policy

pub mod backoff;
pub mod retries;

pub use backoff::calculate_backoff;
pub use retries::with_retry;
