//! Store error definitions.

use thiserror::Error;

/// Errors that can occur while talking to the store.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Connection-level failure; worth retrying.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The statement itself failed.
    #[error("query failed: {0}")]
    Query(String),

    /// Retries did not finish before the deadline.
    #[error("store did not respond within {0} seconds")]
    DeadlineExceeded(u64),
}

impl StoreError {
    /// Whether another attempt could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => StoreError::Unavailable(err.to_string()),
            other => StoreError::Query(other.to_string()),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
