//! Tests for the bare retry loop and linear backoff.

use core::time::Duration;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use retry_rail::async_ext::{retry_with_policy, LinearBackoff, RetryPolicy};
use retry_rail::traits::TransientError;

#[derive(Debug, Clone, PartialEq)]
enum TestError {
    Transient(String),
    Permanent(String),
    RateLimited(Duration),
}

impl std::fmt::Display for TestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TestError::Transient(msg) => write!(f, "transient: {}", msg),
            TestError::Permanent(msg) => write!(f, "permanent: {}", msg),
            TestError::RateLimited(wait) => write!(f, "rate limited for {:?}", wait),
        }
    }
}

impl TransientError for TestError {
    fn is_transient(&self) -> bool {
        !matches!(self, TestError::Permanent(_))
    }

    fn retry_after_hint(&self) -> Option<Duration> {
        match self {
            TestError::RateLimited(wait) => Some(*wait),
            _ => None,
        }
    }
}

// Mock sleep that doesn't actually sleep (for fast tests)
async fn mock_sleep(_: Duration) {}

#[tokio::test]
async fn retry_succeeds_immediately() {
    let counter = Arc::new(AtomicU32::new(0));
    let counter_clone = counter.clone();

    let result = retry_with_policy(
        move || {
            let c = counter_clone.clone();
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok::<_, TestError>(42)
            }
        },
        LinearBackoff::default(),
        mock_sleep,
    )
    .await;

    assert_eq!(result.unwrap(), 42);
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn retry_succeeds_after_transient_failures() {
    let counter = Arc::new(AtomicU32::new(0));
    let counter_clone = counter.clone();

    let result = retry_with_policy(
        move || {
            let c = counter_clone.clone();
            async move {
                let attempt = c.fetch_add(1, Ordering::SeqCst);
                if attempt < 2 {
                    Err(TestError::Transient("gateway".into()))
                } else {
                    Ok(attempt)
                }
            }
        },
        LinearBackoff::new(Duration::from_millis(10), 5),
        mock_sleep,
    )
    .await;

    assert_eq!(result.unwrap(), 2);
    assert_eq!(counter.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn retry_stops_on_permanent_error() {
    let counter = Arc::new(AtomicU32::new(0));
    let counter_clone = counter.clone();

    let result = retry_with_policy(
        move || {
            let c = counter_clone.clone();
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(TestError::Permanent("bad request".into()))
            }
        },
        LinearBackoff::default(),
        mock_sleep,
    )
    .await;

    assert_eq!(
        result.unwrap_err(),
        TestError::Permanent("bad request".into())
    );
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn retry_returns_last_error_when_exhausted() {
    let counter = Arc::new(AtomicU32::new(0));
    let counter_clone = counter.clone();

    let result = retry_with_policy(
        move || {
            let c = counter_clone.clone();
            async move {
                let attempt = c.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(TestError::Transient(format!("attempt {}", attempt + 1)))
            }
        },
        LinearBackoff::new(Duration::from_millis(1), 3),
        mock_sleep,
    )
    .await;

    assert_eq!(
        result.unwrap_err(),
        TestError::Transient("attempt 3".into())
    );
    assert_eq!(counter.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn retry_waits_linearly_and_honors_retry_after_hint() {
    let delays = Arc::new(Mutex::new(Vec::new()));
    let recorded = delays.clone();
    let counter = AtomicU32::new(0);

    let _ = retry_with_policy(
        || {
            let attempt = counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt == 1 {
                    Err::<(), _>(TestError::RateLimited(Duration::from_secs(5)))
                } else {
                    Err(TestError::Transient("busy".into()))
                }
            }
        },
        LinearBackoff::new(Duration::from_millis(100), 4),
        move |delay| {
            recorded.lock().unwrap().push(delay);
            async {}
        },
    )
    .await;

    assert_eq!(
        *delays.lock().unwrap(),
        vec![
            Duration::from_millis(100),
            Duration::from_secs(5),
            Duration::from_millis(300),
        ]
    );
}

#[test]
fn linear_backoff_builders() {
    let mut policy = LinearBackoff::default()
        .with_retry_delay(Duration::from_millis(250))
        .with_max_retries(4);

    assert_eq!(policy.next_delay(0), None);
    assert_eq!(policy.next_delay(1), Some(Duration::from_millis(250)));
    assert_eq!(policy.next_delay(3), Some(Duration::from_millis(750)));
    assert_eq!(policy.next_delay(4), None);

    policy.reset();
    assert_eq!(policy.next_delay(2), Some(Duration::from_millis(500)));
}
