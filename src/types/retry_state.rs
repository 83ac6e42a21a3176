use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Snapshot of an executor's progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RetryState {
    /// Failed attempts of the latest invocation; zero after a success.
    pub attempt_count: u32,
    /// `true` while an attempt after the first one is running.
    pub is_retrying: bool,
}

/// Shared, lock-free holder of a [`RetryState`].
///
/// Each invocation counts its own attempts; the tracker only mirrors the most
/// recent write so callers can render progress.
#[derive(Debug, Default)]
pub(crate) struct RetryTracker {
    attempt_count: AtomicU32,
    is_retrying: AtomicBool,
}

impl RetryTracker {
    pub(crate) fn snapshot(&self) -> RetryState {
        RetryState {
            attempt_count: self.attempt_count.load(Ordering::Acquire),
            is_retrying: self.is_retrying.load(Ordering::Acquire),
        }
    }

    pub(crate) fn set_attempts(&self, count: u32) {
        self.attempt_count.store(count, Ordering::Release);
    }

    pub(crate) fn set_retrying(&self, retrying: bool) {
        self.is_retrying.store(retrying, Ordering::Release);
    }

    pub(crate) fn reset(&self) {
        self.attempt_count.store(0, Ordering::Release);
        self.is_retrying.store(false, Ordering::Release);
    }
}
