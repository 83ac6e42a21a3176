//! Transient/permanent split consumed by retry loops.
//!
//! [`retry_with_policy`](crate::async_ext::retry_with_policy) asks the error
//! directly. [`RetryExecutor`](crate::async_ext::RetryExecutor) asks the
//! [`ClassifiedFailure`](crate::types::ClassifiedFailure) built from it.
//!
//! # Examples
//!
//! ```
//! use core::time::Duration;
//! use retry_rail::traits::TransientError;
//!
//! #[derive(Debug)]
//! enum PaymentError {
//!     GatewayBusy,
//!     Throttled { wait_ms: u64 },
//!     CardDeclined,
//! }
//!
//! impl TransientError for PaymentError {
//!     fn is_transient(&self) -> bool {
//!         !matches!(self, PaymentError::CardDeclined)
//!     }
//!
//!     fn retry_after_hint(&self) -> Option<Duration> {
//!         match self {
//!             PaymentError::Throttled { wait_ms } => Some(Duration::from_millis(*wait_ms)),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! assert!(PaymentError::GatewayBusy.is_transient());
//! assert!(PaymentError::CardDeclined.is_permanent());
//! ```

use core::time::Duration;

/// Whether retrying an error can help.
///
/// Missing responses, client timeouts, throttling and server failures are
/// transient. Rejected credentials, invalid payloads and missing resources
/// are not: the same request fails the same way.
pub trait TransientError {
    fn is_transient(&self) -> bool;

    #[inline]
    fn is_permanent(&self) -> bool {
        !self.is_transient()
    }

    /// Minimum wait requested by the server, e.g. a parsed `Retry-After`.
    /// The bare retry loop waits at least this long.
    #[inline]
    fn retry_after_hint(&self) -> Option<Duration> {
        None
    }
}

/// Connection-level failures are transient; local I/O failures are not.
///
/// Agrees with the [`FailureSource`](crate::traits::FailureSource)
/// classification the executor uses.
impl TransientError for std::io::Error {
    #[inline]
    fn is_transient(&self) -> bool {
        crate::traits::FailureSource::is_retryable(self)
    }
}

/// `Result` helpers for transient errors.
pub trait TransientErrorExt<T, E: TransientError> {
    /// Keeps the result only when it holds a transient error.
    ///
    /// ```
    /// use retry_rail::traits::TransientErrorExt;
    /// use retry_rail::types::ClassifiedFailure;
    ///
    /// let busy: Result<(), _> = Err(ClassifiedFailure::with_status(503, "busy"));
    /// assert!(busy.retry_if_transient().is_some());
    ///
    /// let gone: Result<(), _> = Err(ClassifiedFailure::with_status(404, "gone"));
    /// assert!(gone.retry_if_transient().is_none());
    /// ```
    fn retry_if_transient(self) -> Option<Result<T, E>>;
}

impl<T, E: TransientError> TransientErrorExt<T, E> for Result<T, E> {
    fn retry_if_transient(self) -> Option<Result<T, E>> {
        match &self {
            Err(e) if e.is_transient() => Some(self),
            _ => None,
        }
    }
}
