//! Retry configuration.
//!
//! With the `serde` feature, [`RetryConfig`] can be loaded from any
//! serde format. The delay is encoded as whole milliseconds under
//! `retry_delay_ms`:
//!
//! ```json
//! { "max_retries": 5, "retry_delay_ms": 250, "notice": "every_retry" }
//! ```

use core::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::async_ext::LinearBackoff;

/// Default number of attempts, including the first one.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default base delay of the linear backoff.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(1000);

/// When the executor emits a warning notification for a scheduled retry.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RetryNotice {
    /// Only before the first retry of an invocation.
    #[default]
    FirstRetry,
    /// Before every retry, with the updated count.
    EveryRetry,
    /// Never.
    Silent,
}

impl RetryNotice {
    /// Whether a retry following `failed_attempts` failures should be announced.
    #[inline]
    pub const fn should_notify(self, failed_attempts: u32) -> bool {
        match self {
            Self::FirstRetry => failed_attempts == 1,
            Self::EveryRetry => true,
            Self::Silent => false,
        }
    }
}

/// Configuration shared by every invocation of an executor.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first one.
    pub max_retries: u32,
    /// Base delay; the wait before attempt `n` is `retry_delay * (n - 1)`.
    #[cfg_attr(feature = "serde", serde(rename = "retry_delay_ms", with = "duration_ms"))]
    pub retry_delay: Duration,
    pub notice: RetryNotice,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
            notice: RetryNotice::default(),
        }
    }
}

impl RetryConfig {
    /// Creates the default configuration: 3 attempts, 1s base delay.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the total attempt budget.
    #[inline]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the base delay multiplied by the failed-attempt count.
    #[inline]
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Sets when retry warnings are emitted.
    #[inline]
    pub fn with_notice(mut self, notice: RetryNotice) -> Self {
        self.notice = notice;
        self
    }

    /// Attempt budget actually used: a budget of zero still runs the operation
    /// once.
    #[inline]
    pub fn effective_max_retries(&self) -> u32 {
        self.max_retries.max(1)
    }

    /// The backoff policy described by this configuration.
    #[inline]
    pub fn policy(&self) -> LinearBackoff {
        LinearBackoff::new(self.retry_delay, self.effective_max_retries())
    }
}

#[cfg(feature = "serde")]
mod duration_ms {
    use core::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
