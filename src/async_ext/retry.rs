//! Async retry utilities with runtime-neutral design.
//!
//! This module provides retry policies and a bare retry loop that work with
//! any async runtime by accepting a sleep function as a parameter.

use core::future::Future;
use core::time::Duration;

use crate::traits::TransientError;

/// Defines a retry policy for async operations.
///
/// Implementations determine when and how long to wait between attempts.
pub trait RetryPolicy: Clone {
    /// Returns the delay before the next attempt, or `None` to stop retrying.
    ///
    /// # Arguments
    ///
    /// * `failed_attempts` - Number of attempts that have failed so far (1-indexed)
    fn next_delay(&mut self, failed_attempts: u32) -> Option<Duration>;

    /// Resets the policy to its initial state.
    fn reset(&mut self);
}

/// Linear backoff retry policy.
///
/// The wait before attempt `n` is `retry_delay * (n - 1)`, and at most
/// `max_retries` attempts are made in total (the first one included).
///
/// # Example
///
/// ```rust
/// use retry_rail::async_ext::{LinearBackoff, RetryPolicy};
/// use core::time::Duration;
///
/// let mut policy = LinearBackoff::new(Duration::from_millis(1000), 3);
///
/// assert_eq!(policy.next_delay(1), Some(Duration::from_millis(1000)));
/// assert_eq!(policy.next_delay(2), Some(Duration::from_millis(2000)));
/// assert_eq!(policy.next_delay(3), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinearBackoff {
    /// Base delay, multiplied by the number of failed attempts.
    pub retry_delay: Duration,
    /// Maximum number of attempts, including the first one.
    pub max_retries: u32,
}

impl Default for LinearBackoff {
    fn default() -> Self {
        Self {
            retry_delay: Duration::from_millis(1000),
            max_retries: 3,
        }
    }
}

impl LinearBackoff {
    #[inline]
    pub fn new(retry_delay: Duration, max_retries: u32) -> Self {
        Self {
            retry_delay,
            max_retries,
        }
    }

    #[inline]
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    #[inline]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

impl RetryPolicy for LinearBackoff {
    fn next_delay(&mut self, failed_attempts: u32) -> Option<Duration> {
        if failed_attempts == 0 || failed_attempts >= self.max_retries {
            return None;
        }
        Some(self.retry_delay.saturating_mul(failed_attempts))
    }

    fn reset(&mut self) {
        // LinearBackoff is stateless, nothing to reset
    }
}

/// Retries an async operation according to a policy when transient errors occur.
///
/// This is the bare loop: no notifications, no callbacks, no state snapshot.
/// It returns the last error unchanged. Use
/// [`RetryExecutor`](super::RetryExecutor) for the full behaviour.
///
/// # Arguments
///
/// * `operation` - A closure that returns the future to retry
/// * `policy` - The retry policy to use
/// * `sleep_fn` - A function that returns a sleep future for the given duration
///
/// # Example
///
/// ```rust,ignore
/// use retry_rail::async_ext::{retry_with_policy, LinearBackoff};
///
/// let result = retry_with_policy(
///     || fetch_products(),
///     LinearBackoff::default(),
///     tokio::time::sleep,
/// ).await;
/// ```
pub async fn retry_with_policy<F, Fut, T, E, P, S, SFut>(
    mut operation: F,
    mut policy: P,
    sleep_fn: S,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: TransientError,
    P: RetryPolicy,
    S: Fn(Duration) -> SFut,
    SFut: Future<Output = ()>,
{
    let mut failed = 0u32;

    loop {
        match operation().await {
            Ok(value) => {
                policy.reset();
                return Ok(value);
            }
            Err(e) if e.is_transient() => {
                failed += 1;
                match policy.next_delay(failed) {
                    Some(delay) => {
                        let delay = e.retry_after_hint().map_or(delay, |hint| hint.max(delay));
                        sleep_fn(delay).await;
                    }
                    None => return Err(e),
                }
            }
            Err(e) => return Err(e),
        }
    }
}
