//! Retry logic for store access.
//!
//! # Responsibilities
//! - Retry transient store failures with exponential backoff + jitter
//! - Stop after `max_attempts` or when the overall deadline passes
//! - Return statement errors immediately
//!
//! # Design Decisions
//! - The deadline bounds the whole loop, sleeps included, so a request
//!   never waits on an unreachable store forever

use std::future::Future;
use std::time::Duration;

use crate::config::RetryConfig;
use crate::resilience::backoff::calculate_backoff;
use crate::store::{StoreError, StoreResult};

/// Run `op` under the retry policy in `config`.
pub async fn with_retry<T, F, Fut>(config: &RetryConfig, operation: &str, mut op: F) -> StoreResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = StoreResult<T>>,
{
    let max_attempts = config.max_attempts.max(1);

    let attempts = async {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match op().await {
                Ok(value) => {
                    if attempt > 1 {
                        tracing::info!(operation, attempt, "Store reachable again");
                    }
                    return Ok(value);
                }
                Err(e) if e.is_transient() && attempt < max_attempts => {
                    let delay = calculate_backoff(attempt, config);
                    tracing::warn!(
                        operation,
                        attempt,
                        delay = ?delay,
                        error = %e,
                        "Waiting for store"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    };

    match tokio::time::timeout(Duration::from_secs(config.deadline_secs), attempts).await {
        Ok(result) => result,
        Err(_) => {
            tracing::error!(operation, deadline_secs = config.deadline_secs, "Store retry deadline exceeded");
            Err(StoreError::DeadlineExceeded(config.deadline_secs))
        }
    }
}
