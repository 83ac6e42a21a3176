//! Failure, configuration and state types.
//!
//! # Examples
//!
//! ```
//! use retry_rail::types::{ClassifiedFailure, RetryError};
//!
//! let failure = ClassifiedFailure::with_status(503, "maintenance");
//! let err = RetryError::new("maintenance", failure, 3, true, None);
//!
//! assert!(err.is_exhausted());
//! assert_eq!(err.to_string(), "Server error. Please try again later. (after 3 attempts): maintenance");
//! ```
use smallvec::SmallVec;

pub mod config;
pub mod failure;
pub mod messages;
pub mod retry_error;
pub mod retry_state;

pub use config::*;
pub use failure::*;
pub use retry_error::*;
pub use retry_state::RetryState;
pub(crate) use retry_state::RetryTracker;

/// SmallVec-backed collection used for accumulating validation errors.
///
/// Uses inline storage for up to 2 elements; most rejected inputs fail one or
/// two rules.
pub type ErrorVec<E> = SmallVec<[E; 2]>;

/// Result alias for retried operations.
pub type RetryResult<T, E> = Result<T, RetryError<E>>;
