//! Exponential backoff with jitter.

use rand::Rng;
use std::time::Duration;

use crate::config::RetryConfig;

/// Delay before the next attempt, given how many attempts have failed.
///
/// Doubles from `base_delay_ms`, is capped at `max_delay_ms`, then gains up to
/// 10% jitter. No failures yet means no wait.
pub fn calculate_backoff(failed_attempts: u32, policy: &RetryConfig) -> Duration {
    let Some(doublings) = failed_attempts.checked_sub(1) else {
        return Duration::ZERO;
    };

    let delay_ms = policy
        .base_delay_ms
        .saturating_mul(2u64.saturating_pow(doublings))
        .min(policy.max_delay_ms);

    let jitter_ms = match delay_ms / 10 {
        0 => 0,
        span => rand::thread_rng().gen_range(0..span),
    };

    Duration::from_millis(delay_ms + jitter_ms)
}
