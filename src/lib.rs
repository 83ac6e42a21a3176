//! Retry-with-backoff execution, failure classification and connectivity
//! notifications for storefront API clients.
//!
//! Each submodule re-exports its public surface from here, so consumers can
//! simply depend on `retry_rail::*` or pick focused pieces as needed.
//!
//! # Examples
//!
//! ## Classifying a failure
//!
//! ```
//! use retry_rail::{ClassifiedFailure, FailureKind, TransientError};
//!
//! let failure = ClassifiedFailure::with_status(429, "slow down");
//! assert_eq!(failure.kind(), FailureKind::TransientServer);
//! assert!(failure.is_transient());
//! assert_eq!(failure.user_message(), "Too many requests. Please wait a moment.");
//! ```
//!
//! ## Retrying an operation
//!
//! ```
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use std::time::Duration;
//!
//! use retry_rail::prelude::*;
//!
//! # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! # rt.block_on(async {
//! let calls = &AtomicU32::new(0);
//! let notifier = RecordingNotifier::new();
//! let executor = RetryExecutor::new(RetryConfig::default(), &notifier, |_: Duration| async {});
//!
//! let stock = executor
//!     .execute_with_retry(
//!         move || async move {
//!             match calls.fetch_add(1, Ordering::SeqCst) {
//!                 0 => Err(ClassifiedFailure::with_status(503, "warming up")),
//!                 _ => Ok(12u32),
//!             }
//!         },
//!         RetryOptions::new(),
//!     )
//!     .await;
//!
//! assert_eq!(stock.unwrap(), 12);
//! assert_eq!(executor.retry_count(), 0);
//! assert_eq!(notifier.count(Severity::Warning), 1);
//! # });
//! ```
//!
//! ## Validating a form
//!
//! ```
//! use retry_rail::validation::{check_password, is_national_code};
//!
//! assert!(is_national_code("0499370899"));
//! assert!(check_password("weak").is_invalid());
//! ```

/// Async retry execution and policies
pub mod async_ext;
/// Online/offline tracking with transition notifications
pub mod connectivity;
/// Persian digit, toman price and cart formatting
pub mod format;
/// Notification sinks injected into executors and observers
pub mod notify;
/// Convenience re-exports for quick starts
pub mod prelude;
/// Failure classification traits
pub mod traits;
/// Failure, configuration and state types
pub mod types;
/// Error-accumulating validation and security checks
pub mod validation;

/// Tower integration - Layer and Service implementations (requires `tower` feature)
#[cfg(feature = "tower")]
pub mod tower;

pub use traits::*;
pub use types::{
    messages, ClassifiedFailure, ErrorVec, FailureKind, FailureSummary, RetryConfig, RetryError,
    RetryNotice, RetryResult, RetryState,
};
pub use validation::Validation;
