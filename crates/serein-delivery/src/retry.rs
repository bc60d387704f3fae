//! Retry policy and exponential backoff.
//!
//! [`RetryPolicy`] bounds how many attempts a logical send may issue
//! and how long to wait between them. The delay grows geometrically:
//! `base_delay * backoff_multiplier^(attempt - 1)` for the wait after
//! attempt `attempt`. There is no jitter; the delay floor is part of
//! the pipeline's observable contract.

use std::time::Duration;

use crate::error::DeliveryError;

/// Configuration for retry behavior. Not persisted.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts for one logical send (default: 2).
    pub max_attempts: u32,
    /// Delay before the first retry (default: 1 second).
    pub base_delay: Duration,
    /// Geometric growth factor for successive delays (default: 2.0).
    pub backoff_multiplier: f64,
    /// HTTP status codes in the overload/timeout class that are worth
    /// re-attempting (default: 429, 500, 502, 503, 504).
    pub retryable_status_codes: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            base_delay: Duration::from_secs(1),
            backoff_multiplier: 2.0,
            retryable_status_codes: vec![429, 500, 502, 503, 504],
        }
    }
}

impl RetryPolicy {
    /// Whether `err` is worth another attempt under this policy.
    ///
    /// Transport failures and empty replies are always transient.
    /// Status-bearing overload errors are retried only when their
    /// status is in [`retryable_status_codes`](Self::retryable_status_codes).
    /// Auth errors, other client errors, and cancellation never retry.
    pub fn is_retryable(&self, err: &DeliveryError) -> bool {
        match err {
            DeliveryError::Transport(_) | DeliveryError::EmptyReply => true,
            DeliveryError::ServerOverload { status, .. } => {
                self.retryable_status_codes.contains(status)
            }
            DeliveryError::Auth { .. }
            | DeliveryError::ClientRequest { .. }
            | DeliveryError::Cancelled => false,
        }
    }

    /// The wait before the attempt that follows attempt `attempt`
    /// (1-based): `base_delay * backoff_multiplier^(attempt - 1)`.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exp = self.backoff_multiplier.powi(attempt.saturating_sub(1) as i32);
        let ms = (self.base_delay.as_millis() as f64 * exp).round() as u64;
        Duration::from_millis(ms)
    }
}
