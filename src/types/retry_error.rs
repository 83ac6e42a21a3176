use std::borrow::Cow;
use std::fmt::{self, Debug, Display};

use super::failure::{ClassifiedFailure, FailureKind};

/// Final failure of a retried operation.
///
/// Carries the error produced by the last attempt together with its
/// classification, the number of attempts made and the user-safe message
/// that was (or would have been) shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryError<E> {
    error: E,
    failure: ClassifiedFailure,
    attempts: u32,
    exhausted: bool,
    message: Cow<'static, str>,
}

impl<E> RetryError<E> {
    /// Builds a final failure. `custom_message` replaces the classified
    /// user message when present.
    pub fn new(
        error: E,
        failure: ClassifiedFailure,
        attempts: u32,
        exhausted: bool,
        custom_message: Option<String>,
    ) -> Self {
        let message = match custom_message {
            Some(custom) => Cow::Owned(custom),
            None => Cow::Borrowed(failure.user_message()),
        };
        Self {
            error,
            failure,
            attempts,
            exhausted,
            message,
        }
    }

    #[inline]
    pub fn error(&self) -> &E {
        &self.error
    }

    #[inline]
    pub fn into_inner(self) -> E {
        self.error
    }

    #[inline]
    pub fn failure(&self) -> &ClassifiedFailure {
        &self.failure
    }

    #[inline]
    pub fn kind(&self) -> FailureKind {
        self.failure.kind()
    }

    /// Number of attempts made, including the first.
    #[inline]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// `true` when the attempt budget was used up.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    #[inline]
    pub fn user_message(&self) -> &str {
        &self.message
    }

    /// Maps the inner error, keeping classification and counters.
    pub fn map_err<F, G>(self, f: F) -> RetryError<G>
    where
        F: FnOnce(E) -> G,
    {
        RetryError {
            error: f(self.error),
            failure: self.failure,
            attempts: self.attempts,
            exhausted: self.exhausted,
            message: self.message,
        }
    }
}

impl<E: Display> Display for RetryError<E> {
    /// Standard form: `<user message> (after N attempts): <error>`.
    /// Alternate form (`{:#}`) adds the classification on separate lines.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.attempts == 1 {
            "attempt"
        } else {
            "attempts"
        };
        if f.alternate() {
            writeln!(f, "Error: {}", self.error)?;
            writeln!(f, "Kind: {}", self.kind())?;
            writeln!(f, "Attempts: {}", self.attempts)?;
            write!(f, "Message: {}", self.message)
        } else {
            write!(
                f,
                "{} (after {} {}): {}",
                self.message, self.attempts, noun, self.error
            )
        }
    }
}

impl<E> std::error::Error for RetryError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
