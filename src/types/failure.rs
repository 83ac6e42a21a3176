//! Classified failures and the transient/permanent taxonomy.
//!
//! A [`ClassifiedFailure`] is the per-attempt view the retry executor takes of
//! whatever error an operation produced: an optional transport status, an
//! optional failure code and the raw message. Classification into a
//! [`FailureKind`] is a pure function of the status and code.
//!
//! # Examples
//!
//! ```
//! use retry_rail::types::{ClassifiedFailure, FailureKind};
//!
//! let failure = ClassifiedFailure::with_status(503, "service unavailable");
//! assert_eq!(failure.kind(), FailureKind::TransientServer);
//!
//! let failure = ClassifiedFailure::with_status(404, "no such product");
//! assert_eq!(failure.kind(), FailureKind::PermanentClient);
//! ```

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::traits::TransientError;

/// Failure code reported by HTTP clients when a request is aborted on timeout.
pub const TIMEOUT_CODE: &str = "ECONNABORTED";

/// Failure code reported when a socket-level timeout fires.
pub const SOCKET_TIMEOUT_CODE: &str = "ETIMEDOUT";

/// Failure code for local I/O errors that no retry can fix (missing files,
/// denied permissions, corrupt data).
pub const LOCAL_IO_CODE: &str = "EIO";

/// 4xx statuses (plus the gateway family) that indicate a temporary condition.
pub const RETRYABLE_STATUSES: [u16; 5] = [408, 429, 502, 503, 504];

/// Taxonomy of failures seen by the retry executor.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// No transport status was received, or the client timed out.
    TransientNetwork,
    /// 5xx, or one of the retryable 4xx statuses.
    TransientServer,
    /// Any other 4xx: the request itself is wrong.
    PermanentClient,
    /// A status outside the error ranges paired with a failure, or a local
    /// I/O error.
    Unknown,
}

impl FailureKind {
    /// Returns `true` for the kinds the executor retries.
    #[inline]
    pub const fn is_transient(self) -> bool {
        matches!(self, Self::TransientNetwork | Self::TransientServer)
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::TransientNetwork => "transient network failure",
            Self::TransientServer => "transient server failure",
            Self::PermanentClient => "permanent client failure",
            Self::Unknown => "unknown failure",
        };
        f.write_str(label)
    }
}

/// Per-attempt description of a failed operation.
///
/// A transport status of `0` carries no information (it is what browsers and
/// most HTTP clients report when no response arrived) and is normalised to
/// `None` by every constructor.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassifiedFailure {
    status: Option<u16>,
    code: Option<String>,
    message: String,
}

impl ClassifiedFailure {
    /// Creates a failure from its raw parts.
    pub fn new(status: Option<u16>, code: Option<String>, message: impl Into<String>) -> Self {
        Self {
            status: status.filter(|s| *s != 0),
            code,
            message: message.into(),
        }
    }

    /// A failure for which no response was received.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(None, None, message)
    }

    /// A failure carrying a transport status.
    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self::new(Some(status), None, message)
    }

    /// A client-side timeout.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(None, Some(TIMEOUT_CODE.to_owned()), message)
    }

    /// Attaches a failure code.
    #[must_use]
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Transport status, `None` when no response arrived.
    #[inline]
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Client-level failure code such as `ECONNABORTED`.
    #[inline]
    pub fn failure_code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Raw error text, for logs only.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns `true` when the failure code denotes a client-side timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self.code.as_deref(),
            Some(TIMEOUT_CODE | SOCKET_TIMEOUT_CODE)
        )
    }

    /// Returns `true` when the failure code marks a local I/O error.
    pub fn is_local_io(&self) -> bool {
        self.code.as_deref() == Some(LOCAL_IO_CODE)
    }

    /// Returns `true` for rejected credentials (401) and denied access (403).
    ///
    /// ```
    /// use retry_rail::types::ClassifiedFailure;
    ///
    /// assert!(ClassifiedFailure::with_status(403, "admin only").is_auth());
    /// assert!(!ClassifiedFailure::with_status(404, "gone").is_auth());
    /// ```
    #[inline]
    pub fn is_auth(&self) -> bool {
        matches!(self.status, Some(401 | 403))
    }

    /// Returns `true` when no response arrived or the client timed out.
    #[inline]
    pub fn is_network(&self) -> bool {
        !self.is_local_io() && (self.status.is_none() || self.is_timeout())
    }

    /// Classifies this failure.
    ///
    /// A local I/O code is unknown regardless of status. Otherwise checks run
    /// in order: missing status, 5xx, timeout code, the retryable status
    /// list. Whatever remains is permanent when it is a 4xx and unknown
    /// otherwise.
    pub fn kind(&self) -> FailureKind {
        match self.status {
            _ if self.is_local_io() => FailureKind::Unknown,
            None => FailureKind::TransientNetwork,
            Some(status) if status >= 500 => FailureKind::TransientServer,
            Some(_) if self.is_timeout() => FailureKind::TransientNetwork,
            Some(status) if RETRYABLE_STATUSES.contains(&status) => FailureKind::TransientServer,
            Some(400..=499) => FailureKind::PermanentClient,
            Some(_) => FailureKind::Unknown,
        }
    }

    /// Flattens this failure into the fields a UI or API response needs.
    ///
    /// ```
    /// use retry_rail::types::ClassifiedFailure;
    ///
    /// let summary = ClassifiedFailure::with_status(401, "token expired").summary();
    /// assert!(summary.auth);
    /// assert!(!summary.retryable);
    /// assert_eq!(summary.message, "Please sign in again.");
    /// ```
    pub fn summary(&self) -> FailureSummary {
        let kind = self.kind();
        FailureSummary {
            message: self.user_message(),
            status: self.status,
            kind,
            retryable: kind.is_transient(),
            auth: self.is_auth(),
            network: self.is_network(),
        }
    }

    /// Fixed, user-safe message for this failure.
    ///
    /// See [`user_message`](crate::types::messages::user_message).
    #[inline]
    pub fn user_message(&self) -> &'static str {
        crate::types::messages::user_message(self)
    }
}

/// Normalized view of a [`ClassifiedFailure`], see
/// [`ClassifiedFailure::summary`].
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FailureSummary {
    /// User-safe message.
    pub message: &'static str,
    pub status: Option<u16>,
    pub kind: FailureKind,
    pub retryable: bool,
    pub auth: bool,
    pub network: bool,
}

impl TransientError for ClassifiedFailure {
    #[inline]
    fn is_transient(&self) -> bool {
        self.kind().is_transient()
    }
}

impl fmt::Display for ClassifiedFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.status, self.code.as_deref()) {
            (Some(status), Some(code)) => write!(f, "[{status} {code}] {}", self.message),
            (Some(status), None) => write!(f, "[{status}] {}", self.message),
            (None, Some(code)) => write!(f, "[{code}] {}", self.message),
            (None, None) => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ClassifiedFailure {}
