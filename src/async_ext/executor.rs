//! The retry executor: linear backoff, classification, notifications and
//! caller callbacks around a single async operation.

use core::future::Future;
use core::time::Duration;

use super::backoff::BackoffDelay;
use super::options::RetryOptions;
use super::retry::RetryPolicy;
use crate::notify::Notifier;
use crate::traits::{FailureSource, TransientError};
use crate::types::{
    messages, ClassifiedFailure, RetryConfig, RetryError, RetryState, RetryTracker,
};

/// Runs operations with retry, reporting through an injected [`Notifier`].
///
/// The executor is runtime-neutral: `sleep` produces the wait future between
/// attempts (`tokio::time::sleep` with the `async-tokio` feature, see
/// [`RetryExecutor::with_tokio`]).
///
/// Each call to [`execute_with_retry`](Self::execute_with_retry) counts its own
/// attempts. The [`RetryState`] exposed by [`state`](Self::state) mirrors the
/// latest invocation.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
///
/// use retry_rail::async_ext::{RetryExecutor, RetryOptions};
/// use retry_rail::notify::RecordingNotifier;
/// use retry_rail::types::{ClassifiedFailure, RetryConfig};
///
/// # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
/// # rt.block_on(async {
/// let notifier = RecordingNotifier::new();
/// let executor = RetryExecutor::new(RetryConfig::default(), &notifier, |_: Duration| async {});
///
/// let result = executor
///     .execute_with_retry(
///         || async { Err::<(), _>(ClassifiedFailure::with_status(404, "no such product")) },
///         RetryOptions::new(),
///     )
///     .await;
///
/// let err = result.unwrap_err();
/// assert_eq!(err.attempts(), 1);
/// assert_eq!(err.user_message(), "The requested resource was not found.");
/// # });
/// ```
#[derive(Debug)]
pub struct RetryExecutor<N, S> {
    config: RetryConfig,
    notifier: N,
    sleep: S,
    tracker: RetryTracker,
}

impl<N, S> RetryExecutor<N, S> {
    /// Creates an executor that waits between attempts with `sleep`.
    pub fn new(config: RetryConfig, notifier: N, sleep: S) -> Self {
        Self {
            config,
            notifier,
            sleep,
            tracker: RetryTracker::default(),
        }
    }

    /// Returns the retry configuration.
    #[inline]
    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Returns the notification sink.
    #[inline]
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Snapshot of the latest invocation's progress.
    #[inline]
    pub fn state(&self) -> RetryState {
        self.tracker.snapshot()
    }

    /// Failed attempts of the latest invocation; zero after a success.
    #[inline]
    pub fn retry_count(&self) -> u32 {
        self.tracker.snapshot().attempt_count
    }

    /// Returns `true` while a retry of the latest invocation is in flight.
    #[inline]
    pub fn is_retrying(&self) -> bool {
        self.tracker.snapshot().is_retrying
    }

    /// Returns `true` if the latest invocation has attempts left.
    #[inline]
    pub fn has_retries_left(&self) -> bool {
        self.retry_count() < self.config.effective_max_retries()
    }

    /// Clears the state snapshot.
    #[inline]
    pub fn reset(&self) {
        self.tracker.reset();
    }
}

impl<N, S, SFut> RetryExecutor<N, S>
where
    N: Notifier,
    S: Fn(Duration) -> SFut,
    SFut: Future<Output = ()>,
{
    /// Runs `operation` until it succeeds, fails permanently, or the attempt
    /// budget is used up.
    ///
    /// - Attempt 1 runs immediately.
    /// - A retryable failure after `n` failed attempts waits
    ///   `retry_delay * n` and tries again while `n < max_retries`.
    /// - On success the state resets and `on_success` fires.
    /// - On final failure `on_max_retries_reached` fires if the budget was
    ///   used up, then the error notification is emitted, then `on_error`
    ///   fires, and the error is returned.
    pub async fn execute_with_retry<F, Fut, T, E>(
        &self,
        mut operation: F,
        mut options: RetryOptions<'_, T, E>,
    ) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: FailureSource,
    {
        let mut policy = self.config.policy();
        let max_retries = self.config.effective_max_retries();
        let mut failed = 0u32;

        loop {
            self.tracker.set_retrying(failed > 0);

            let error = match operation().await {
                Ok(value) => {
                    self.tracker.reset();
                    policy.reset();
                    if let Some(on_success) = options.on_success.take() {
                        on_success(&value);
                    }
                    return Ok(value);
                }
                Err(error) => error,
            };

            failed += 1;
            self.tracker.set_attempts(failed);
            let failure = error.classify();

            let delay = if failure.is_transient() {
                policy.next_delay(failed)
            } else {
                None
            };
            let Some(delay) = delay else {
                return Err(self.fail(error, failure, failed, max_retries, options));
            };

            if options.notify_on_error && self.config.notice.should_notify(failed) {
                let notice = messages::retrying(failed, max_retries);
                self.notifier.warning(&notice);
            }

            #[cfg(feature = "tracing")]
            tracing::debug!(
                attempt = failed,
                max_retries,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                kind = %failure.kind(),
                "retrying after transient failure"
            );

            let wait = BackoffDelay::new(failed + 1, delay, (self.sleep)(delay));
            wait.await;
        }
    }

    fn fail<T, E>(
        &self,
        error: E,
        failure: ClassifiedFailure,
        failed: u32,
        max_retries: u32,
        mut options: RetryOptions<'_, T, E>,
    ) -> RetryError<E> {
        self.tracker.set_retrying(false);
        let exhausted = failed >= max_retries;

        #[cfg(feature = "tracing")]
        tracing::warn!(
            attempts = failed,
            exhausted,
            kind = %failure.kind(),
            error = %failure,
            "operation failed"
        );

        if exhausted {
            if let Some(on_max) = options.on_max_retries_reached.take() {
                on_max(&error);
            }
        }

        let retry_error = RetryError::new(
            error,
            failure,
            failed,
            exhausted,
            options.custom_error_message.take(),
        );

        if options.notify_on_error {
            self.notifier.error(retry_error.user_message());
        }

        if let Some(on_error) = options.on_error.take() {
            on_error(retry_error.error());
        }

        retry_error
    }
}
