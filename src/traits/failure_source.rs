//! Conversion of arbitrary operation errors into [`ClassifiedFailure`]s.
//!
//! The retry executor is agnostic to the transport behind an operation. It
//! only needs an error to report a transport status and, optionally, a
//! failure code; everything else is derived.

use std::fmt::Display;

use crate::types::{ClassifiedFailure, FailureKind, LOCAL_IO_CODE, SOCKET_TIMEOUT_CODE};

/// An error that can be classified for retry decisions.
///
/// # Examples
///
/// ```
/// use std::fmt;
/// use retry_rail::traits::FailureSource;
/// use retry_rail::types::FailureKind;
///
/// #[derive(Debug)]
/// struct ApiError { status: u16 }
///
/// impl fmt::Display for ApiError {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "api returned {}", self.status)
///     }
/// }
///
/// impl FailureSource for ApiError {
///     fn transport_status(&self) -> Option<u16> {
///         Some(self.status)
///     }
/// }
///
/// assert_eq!(ApiError { status: 429 }.classify().kind(), FailureKind::TransientServer);
/// assert!(!ApiError { status: 401 }.is_retryable());
/// ```
pub trait FailureSource: Display {
    /// Transport status, if a response was received.
    fn transport_status(&self) -> Option<u16>;

    /// Client-level failure code such as `ECONNABORTED`.
    #[inline]
    fn failure_code(&self) -> Option<&str> {
        None
    }

    /// Builds the per-attempt classification of this error.
    fn classify(&self) -> ClassifiedFailure {
        ClassifiedFailure::new(
            self.transport_status(),
            self.failure_code().map(str::to_owned),
            self.to_string(),
        )
    }

    #[inline]
    fn failure_kind(&self) -> FailureKind {
        self.classify().kind()
    }

    #[inline]
    fn is_retryable(&self) -> bool {
        self.failure_kind().is_transient()
    }
}

impl FailureSource for ClassifiedFailure {
    #[inline]
    fn transport_status(&self) -> Option<u16> {
        self.status()
    }

    #[inline]
    fn failure_code(&self) -> Option<&str> {
        ClassifiedFailure::failure_code(self)
    }

    #[inline]
    fn classify(&self) -> ClassifiedFailure {
        self.clone()
    }
}

/// I/O errors never carry a transport status. Timeouts report a timeout code,
/// connection failures report none, and every other kind is a local error.
impl FailureSource for std::io::Error {
    #[inline]
    fn transport_status(&self) -> Option<u16> {
        None
    }

    fn failure_code(&self) -> Option<&str> {
        use std::io::ErrorKind::*;
        match self.kind() {
            TimedOut => Some(SOCKET_TIMEOUT_CODE),
            ConnectionRefused
            | ConnectionReset
            | ConnectionAborted
            | NotConnected
            | Interrupted
            | WouldBlock => None,
            _ => Some(LOCAL_IO_CODE),
        }
    }
}

impl<E: FailureSource + ?Sized> FailureSource for Box<E> {
    #[inline]
    fn transport_status(&self) -> Option<u16> {
        (**self).transport_status()
    }

    #[inline]
    fn failure_code(&self) -> Option<&str> {
        (**self).failure_code()
    }
}

/// Returns `true` when `error` should be retried.
#[inline]
pub fn is_retryable<E: FailureSource + ?Sized>(error: &E) -> bool {
    error.is_retryable()
}
