//! Debounce and throttle gates on the tokio timer.
//!
//! Both read `tokio::time::Instant`, so they follow a paused test clock.

use core::future::Future;
use core::time::Duration;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::time::Instant;

/// Trailing-edge debounce: only the last call of a burst goes through.
///
/// Each call to [`debounce`](Self::debounce) supersedes every earlier one.
/// A call resolves to its value once `wait` has passed without a newer call,
/// and to `None` if a newer call arrived in the meantime.
///
/// ```rust
/// use std::time::Duration;
///
/// use retry_rail::async_ext::Debouncer;
///
/// # let rt = tokio::runtime::Builder::new_current_thread()
/// #     .enable_time()
/// #     .start_paused(true)
/// #     .build()
/// #     .unwrap();
/// # rt.block_on(async {
/// let search = Debouncer::new(Duration::from_millis(300));
///
/// let stale = search.debounce("lap");
/// let latest = search.debounce("laptop");
/// let (stale, latest) = tokio::join!(stale, latest);
///
/// assert_eq!(stale, None);
/// assert_eq!(latest, Some("laptop"));
/// # });
/// ```
#[derive(Debug)]
pub struct Debouncer {
    wait: Duration,
    generation: AtomicU64,
}

impl Debouncer {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            generation: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Registers `value` as the latest call and waits out the quiet period.
    ///
    /// The call is registered before the returned future is first polled.
    /// Dropping the future abandons the value without affecting newer calls.
    pub fn debounce<'a, T: 'a>(&'a self, value: T) -> impl Future<Output = Option<T>> + 'a {
        let ticket = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        async move {
            tokio::time::sleep(self.wait).await;
            if self.generation.load(Ordering::Acquire) == ticket {
                Some(value)
            } else {
                #[cfg(feature = "tracing")]
                tracing::trace!(ticket, "debounced call superseded");
                None
            }
        }
    }

    /// Supersedes every pending call without registering a new one.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }
}

/// Leading-edge throttle: the first call runs, then calls are dropped until
/// `limit` has passed since the last call that ran.
///
/// ```rust
/// use std::time::Duration;
///
/// use retry_rail::async_ext::Throttle;
///
/// # let rt = tokio::runtime::Builder::new_current_thread()
/// #     .enable_time()
/// #     .start_paused(true)
/// #     .build()
/// #     .unwrap();
/// # rt.block_on(async {
/// let scroll = Throttle::new(Duration::from_millis(16));
///
/// assert_eq!(scroll.call(|| "render"), Some("render"));
/// assert_eq!(scroll.call(|| "render"), None);
///
/// tokio::time::advance(Duration::from_millis(16)).await;
/// assert!(scroll.try_acquire());
/// # });
/// ```
#[derive(Debug)]
pub struct Throttle {
    limit: Duration,
    last_run: Mutex<Option<Instant>>,
}

impl Throttle {
    pub fn new(limit: Duration) -> Self {
        Self {
            limit,
            last_run: Mutex::new(None),
        }
    }

    #[inline]
    pub fn limit(&self) -> Duration {
        self.limit
    }

    /// Claims the slot if the throttle window is open.
    pub fn try_acquire(&self) -> bool {
        let now = Instant::now();
        let mut last_run = self.last_run();
        match *last_run {
            Some(at) if now.duration_since(at) < self.limit => false,
            _ => {
                *last_run = Some(now);
                true
            }
        }
    }

    /// Runs `f` if the throttle window is open.
    pub fn call<R>(&self, f: impl FnOnce() -> R) -> Option<R> {
        if self.try_acquire() {
            Some(f())
        } else {
            None
        }
    }

    /// Reopens the window immediately.
    pub fn reset(&self) {
        *self.last_run() = None;
    }

    fn last_run(&self) -> MutexGuard<'_, Option<Instant>> {
        self.last_run.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
