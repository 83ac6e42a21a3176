//! Core traits for failure classification.
//!
//! - [`TransientError`]: transient vs. permanent, consumed by retry loops
//! - [`FailureSource`]: exposes transport status and failure code so any
//!   error can be turned into a [`ClassifiedFailure`](crate::types::ClassifiedFailure)
//!
//! # Examples
//!
//! ```
//! use retry_rail::traits::{FailureSource, TransientError};
//! use retry_rail::types::ClassifiedFailure;
//!
//! let failure = ClassifiedFailure::network("dns lookup failed");
//! assert!(failure.is_transient());
//! assert!(failure.is_retryable());
//! ```

pub mod failure_source;
pub mod transient;

pub use failure_source::{is_retryable, FailureSource};
pub use transient::{TransientError, TransientErrorExt};
