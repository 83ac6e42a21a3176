use crate::common::configure_criterion;
use criterion::{criterion_group, Criterion};
use retry_rail::async_ext::{retry_with_policy, LinearBackoff, RetryExecutor, RetryOptions};
use retry_rail::notify::NoopNotifier;
use retry_rail::types::{ClassifiedFailure, RetryConfig};
use std::hint::black_box;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tokio::runtime::Runtime;

async fn no_sleep(_: Duration) {}

pub fn bench_retry_operations(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("retry");
    let executor = RetryExecutor::new(RetryConfig::default(), NoopNotifier, no_sleep);

    // First attempt succeeds
    group.bench_function("executor_success", |b| {
        b.iter(|| {
            rt.block_on(async {
                let result = executor
                    .execute_with_retry(
                        || async { Ok::<_, ClassifiedFailure>(1u32) },
                        RetryOptions::new(),
                    )
                    .await;
                black_box(result)
            })
        })
    });

    // Two transient failures, then success
    group.bench_function("executor_recovers", |b| {
        b.iter(|| {
            rt.block_on(async {
                let calls = AtomicU32::new(0);
                let result = executor
                    .execute_with_retry(
                        || {
                            let attempt = calls.fetch_add(1, Ordering::Relaxed);
                            async move {
                                if attempt < 2 {
                                    Err(ClassifiedFailure::with_status(503, "busy"))
                                } else {
                                    Ok(attempt)
                                }
                            }
                        },
                        RetryOptions::new(),
                    )
                    .await;
                black_box(result)
            })
        })
    });

    // Permanent failure short-circuits
    group.bench_function("executor_permanent", |b| {
        b.iter(|| {
            rt.block_on(async {
                let result = executor
                    .execute_with_retry(
                        || async { Err::<(), _>(ClassifiedFailure::with_status(404, "missing")) },
                        RetryOptions::new(),
                    )
                    .await;
                black_box(result)
            })
        })
    });

    group.bench_function("bare_loop_exhausted", |b| {
        b.iter(|| {
            rt.block_on(async {
                let result = retry_with_policy(
                    || async { Err::<(), _>(ClassifiedFailure::network("offline")) },
                    LinearBackoff::default(),
                    no_sleep,
                )
                .await;
                black_box(result)
            })
        })
    });

    group.finish();
}

criterion_group! {
    name = retry_benches;
    config = configure_criterion();
    targets = bench_retry_operations,
}
