//! Convenience re-exports for common retry workflows.
//!
//! ```
//! use retry_rail::prelude::*;
//!
//! let config = RetryConfig::default().with_notice(RetryNotice::EveryRetry);
//! assert_eq!(config.max_retries, 3);
//! ```

pub use crate::async_ext::{LinearBackoff, RetryExecutor, RetryOptions, RetryPolicy};
pub use crate::connectivity::{ConnectivityHost, ConnectivityObserver, ManualHost, Transition};
pub use crate::notify::{NoopNotifier, Notifier, RecordingNotifier, Severity};
pub use crate::traits::{FailureSource, TransientError};
pub use crate::types::{
    ClassifiedFailure, FailureKind, RetryConfig, RetryError, RetryNotice, RetryResult, RetryState,
};
pub use crate::validation::Validation;

#[cfg(feature = "tracing")]
pub use crate::notify::TracingNotifier;
