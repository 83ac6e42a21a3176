use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};
use core::time::Duration;

use futures_core::future::FusedFuture;
use pin_project_lite::pin_project;

pin_project! {
    /// The wait between two attempts of a retried operation.
    ///
    /// Wraps the sleep future produced by the executor's sleep function and
    /// remembers which attempt it precedes. Dropping it (or the invocation
    /// future that owns it) abandons the wait: no further attempt runs and no
    /// callback fires.
    #[must_use = "futures do nothing unless polled"]
    pub struct BackoffDelay<S> {
        #[pin]
        sleep: S,
        next_attempt: u32,
        delay: Duration,
        done: bool,
    }
}

impl<S> BackoffDelay<S> {
    #[inline]
    pub fn new(next_attempt: u32, delay: Duration, sleep: S) -> Self {
        Self {
            sleep,
            next_attempt,
            delay,
            done: false,
        }
    }

    /// The 1-indexed attempt that runs once this wait completes.
    #[inline]
    pub fn next_attempt(&self) -> u32 {
        self.next_attempt
    }

    #[inline]
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl<S> Future for BackoffDelay<S>
where
    S: Future<Output = ()>,
{
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let this = self.project();
        if *this.done {
            return Poll::Ready(());
        }
        match this.sleep.poll(cx) {
            Poll::Ready(()) => {
                *this.done = true;
                Poll::Ready(())
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<S> FusedFuture for BackoffDelay<S>
where
    S: Future<Output = ()>,
{
    #[inline]
    fn is_terminated(&self) -> bool {
        self.done
    }
}
