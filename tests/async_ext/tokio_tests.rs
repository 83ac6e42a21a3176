//! Tests for Tokio integration.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use retry_rail::async_ext::{
    retry_transient, retry_transient_n, LinearBackoff, RetryExecutor, RetryOptions,
};
use retry_rail::notify::{RecordingNotifier, Severity};
use retry_rail::types::{ClassifiedFailure, RetryConfig};
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn tokio_executor_waits_the_linear_schedule() {
    let notifier = RecordingNotifier::new();
    let executor = RetryExecutor::with_tokio(RetryConfig::default(), &notifier);
    let started = Instant::now();

    let result = executor
        .execute_with_retry(
            || async { Err::<(), _>(ClassifiedFailure::with_status(503, "unavailable")) },
            RetryOptions::new(),
        )
        .await;

    assert!(result.is_err());
    // 1s before attempt 2, 2s before attempt 3.
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(3));
    assert!(elapsed < Duration::from_millis(3100));
}

#[tokio::test(start_paused = true)]
async fn dropping_the_invocation_abandons_pending_retries() {
    let notifier = RecordingNotifier::new();
    let executor = RetryExecutor::with_tokio(RetryConfig::default(), &notifier);
    let calls = AtomicU32::new(0);
    let errors = AtomicU32::new(0);

    let invocation = executor.execute_with_retry(
        || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<(), _>(ClassifiedFailure::network("offline")) }
        },
        RetryOptions::new().on_error(|_| {
            errors.fetch_add(1, Ordering::SeqCst);
        }),
    );

    // Attempt 2 would start after 1s; give up halfway through the wait.
    let outcome = tokio::time::timeout(Duration::from_millis(500), invocation).await;
    assert!(outcome.is_err());

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(errors.load(Ordering::SeqCst), 0);
    assert_eq!(notifier.count(Severity::Error), 0);
    assert_eq!(notifier.count(Severity::Warning), 1);
}

#[tokio::test(start_paused = true)]
async fn concurrent_invocations_count_independently() {
    let notifier = RecordingNotifier::new();
    let executor = RetryExecutor::with_tokio(RetryConfig::default(), &notifier);
    let first_calls = AtomicU32::new(0);
    let second_calls = AtomicU32::new(0);

    let first = executor.execute_with_retry(
        || {
            first_calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<u32, _>(ClassifiedFailure::with_status(502, "bad gateway")) }
        },
        RetryOptions::new(),
    );
    let second = executor.execute_with_retry(
        || {
            let attempt = second_calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt == 0 {
                    Err(ClassifiedFailure::with_status(502, "bad gateway"))
                } else {
                    Ok(1u32)
                }
            }
        },
        RetryOptions::new(),
    );

    let (first, second) = tokio::join!(first, second);

    assert_eq!(first.unwrap_err().attempts(), 3);
    assert_eq!(second.unwrap(), 1);
    assert_eq!(first_calls.load(Ordering::SeqCst), 3);
    assert_eq!(second_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn retry_transient_succeeds_after_failures() {
    let counter = Arc::new(AtomicU32::new(0));
    let counter_clone = counter.clone();

    let result = retry_transient(
        move || {
            let c = counter_clone.clone();
            async move {
                if c.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(std::io::Error::from(std::io::ErrorKind::ConnectionReset))
                } else {
                    Ok("catalog")
                }
            }
        },
        LinearBackoff::new(Duration::from_millis(100), 3),
    )
    .await;

    assert_eq!(result.unwrap(), "catalog");
    assert_eq!(counter.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn retry_transient_n_respects_attempt_budget() {
    let counter = Arc::new(AtomicU32::new(0));
    let counter_clone = counter.clone();

    let result = retry_transient_n(
        move || {
            let c = counter_clone.clone();
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(std::io::Error::from(std::io::ErrorKind::TimedOut))
            }
        },
        2,
    )
    .await;

    assert_eq!(result.unwrap_err().kind(), std::io::ErrorKind::TimedOut);
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}
