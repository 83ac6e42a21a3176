//! Tokio-specific async extensions.
//!
//! # Feature Flag
//!
//! Requires the `async-tokio` feature (enabled by default):
//!
//! ```toml
//! [dependencies]
//! retry-rail = { version = "0.1", features = ["async-tokio"] }
//! ```

use core::future::Future;
use core::time::Duration;

use tokio::time::Sleep;

use super::executor::RetryExecutor;
use super::retry::{retry_with_policy, LinearBackoff, RetryPolicy};
use crate::traits::TransientError;
use crate::types::RetryConfig;

/// Sleep function used by tokio-backed executors.
pub type TokioSleep = fn(Duration) -> Sleep;

/// A [`RetryExecutor`] that waits with `tokio::time::sleep`.
pub type TokioRetryExecutor<N> = RetryExecutor<N, TokioSleep>;

impl<N> RetryExecutor<N, TokioSleep> {
    /// Creates an executor that sleeps on the tokio timer.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use retry_rail::async_ext::{RetryExecutor, RetryOptions};
    /// use retry_rail::notify::TracingNotifier;
    /// use retry_rail::types::RetryConfig;
    ///
    /// let executor = RetryExecutor::with_tokio(RetryConfig::default(), TracingNotifier);
    /// let products = executor.execute_with_retry(|| api.list_products(), RetryOptions::new()).await?;
    /// ```
    pub fn with_tokio(config: RetryConfig, notifier: N) -> Self {
        RetryExecutor::new(config, notifier, tokio::time::sleep as TokioSleep)
    }
}

/// Retries an async operation using Tokio's sleep.
///
/// Convenience wrapper around [`retry_with_policy`].
///
/// # Example
///
/// ```rust,ignore
/// use retry_rail::async_ext::{retry_transient, LinearBackoff};
///
/// let result = retry_transient(|| fetch_cart(), LinearBackoff::default()).await;
/// ```
pub async fn retry_transient<F, Fut, T, E, P>(operation: F, policy: P) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: TransientError,
    P: RetryPolicy,
{
    retry_with_policy(operation, policy, tokio::time::sleep).await
}

/// Retries an async operation up to `max_retries` attempts with the default
/// one-second linear backoff.
pub async fn retry_transient_n<F, Fut, T, E>(operation: F, max_retries: u32) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: TransientError,
{
    let policy = LinearBackoff::default().with_max_retries(max_retries);
    retry_transient(operation, policy).await
}
