//! Benchmarks for genlog.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use genlog::{kv, Entry, Logger};

fn counting_logger() -> Logger {
    let total = Arc::new(AtomicI64::new(0));
    Logger::new(move |e: &Entry| {
        total.fetch_add(i64::from(e.level), Ordering::Relaxed);
    })
}

fn benchmark_basic(c: &mut Criterion) {
    let log = counting_logger();

    c.bench_function("info_basic", |b| {
        b.iter(|| log.info(black_box("hello"), kv![]));
    });
}

fn benchmark_basic_with_caller(c: &mut Criterion) {
    let log = counting_logger().with_caller(true);

    c.bench_function("info_basic_with_caller", |b| {
        b.iter(|| log.info(black_box("hello"), kv![]));
    });
}

fn benchmark_two_vars(c: &mut Criterion) {
    let log = counting_logger();

    c.bench_function("info_2vars", |b| {
        b.iter(|| log.info(black_box("hello"), kv!["a", 1, "b", 2]));
    });
}

fn benchmark_disabled(c: &mut Criterion) {
    let log = counting_logger().with_verbosity(0).v(1);

    c.bench_function("info_disabled", |b| {
        b.iter(|| log.info(black_box("hello"), kv!["a", 1, "b", 2]));
    });
}

fn benchmark_complicated(c: &mut Criterion) {
    let log = counting_logger();

    c.bench_function("info_complicated", |b| {
        b.iter(|| {
            log.with_name("bench")
                .with_values(kv!["x", 123])
                .info(black_box("hello"), kv!["a", 1, "b", 2]);
        });
    });
}

fn benchmark_complicated_precalculated(c: &mut Criterion) {
    let log = counting_logger().with_name("bench").with_values(kv!["x", 123]);

    c.bench_function("info_complicated_precalculated", |b| {
        b.iter(|| log.info(black_box("hello"), kv!["a", 1, "b", 2]));
    });
}

fn benchmark_two_vars_to_string(c: &mut Criterion) {
    let last = Arc::new(parking_lot::Mutex::new(String::new()));
    let slot = Arc::clone(&last);
    let log = Logger::new(move |e: &Entry| *slot.lock() = e.to_string());

    c.bench_function("info_2vars_to_string", |b| {
        b.iter(|| log.info(black_box("hello"), kv!["a", 1, "b", 2]));
    });
}

criterion_group!(
    benches,
    benchmark_basic,
    benchmark_basic_with_caller,
    benchmark_two_vars,
    benchmark_disabled,
    benchmark_complicated,
    benchmark_complicated_precalculated,
    benchmark_two_vars_to_string,
);
criterion_main!(benches);
