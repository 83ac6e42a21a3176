//! Async retry execution.
//!
//! - [`RetryExecutor`]: the full wrapper (classification, linear backoff,
//!   notifications, callbacks, state snapshot)
//! - [`retry_with_policy`]: the bare runtime-neutral loop
//! - [`RetryPolicy`] / [`LinearBackoff`]: delay schedule
//! - [`BackoffDelay`]: the explicit wait between attempts
//! - `Debouncer` / `Throttle`: rate gates on the tokio timer (`async-tokio`)
//!
//! # Examples
//!
//! ```ignore
//! use retry_rail::async_ext::{RetryExecutor, RetryOptions};
//! use retry_rail::notify::TracingNotifier;
//! use retry_rail::types::RetryConfig;
//!
//! async fn load_catalog(api: &Api) -> Result<Catalog, RetryError<ApiError>> {
//!     let executor = RetryExecutor::with_tokio(RetryConfig::default(), TracingNotifier);
//!     executor
//!         .execute_with_retry(|| api.catalog(), RetryOptions::new())
//!         .await
//! }
//! ```

mod backoff;
mod executor;
mod options;
mod retry;

#[cfg(feature = "async-tokio")]
mod rate;
#[cfg(feature = "async-tokio")]
mod tokio_ext;

pub use backoff::BackoffDelay;
pub use executor::RetryExecutor;
pub use options::RetryOptions;
pub use retry::{retry_with_policy, LinearBackoff, RetryPolicy};

#[cfg(feature = "async-tokio")]
pub use rate::{Debouncer, Throttle};
#[cfg(feature = "async-tokio")]
pub use tokio_ext::{retry_transient, retry_transient_n, TokioRetryExecutor, TokioSleep};
