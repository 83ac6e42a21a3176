use crate::common::{configure_criterion, realistic_failures};
use criterion::{criterion_group, Criterion};
use retry_rail::messages;
use retry_rail::traits::FailureSource;
use retry_rail::types::ClassifiedFailure;
use std::hint::black_box;

pub fn bench_classification(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    group.bench_function("single_status", |b| {
        let failure = ClassifiedFailure::with_status(503, "unavailable");
        b.iter(|| black_box(black_box(&failure).kind()))
    });

    group.bench_function("realistic_mix", |b| {
        let failures = realistic_failures();
        b.iter(|| failures.iter().filter(|f| f.kind().is_transient()).count())
    });

    group.bench_function("user_message_mix", |b| {
        let failures = realistic_failures();
        b.iter(|| {
            for failure in failures {
                black_box(messages::user_message(failure));
            }
        })
    });

    group.bench_function("io_error_classify", |b| {
        let err = std::io::Error::new(std::io::ErrorKind::TimedOut, "read timeout");
        b.iter(|| black_box(black_box(&err).classify()))
    });

    group.finish();
}

criterion_group! {
    name = classify_benches;
    config = configure_criterion();
    targets = bench_classification,
}
