//! # Timer Queue Benchmark
//!
//! Budgets:
//! - Scheduling a timeout: well under 1µs
//! - Draining 10k staggered timeouts: < 5ms
//! - Full page load (driver + 100 cards): < 1ms
//!
//! Run with: `cargo bench --package banque_ui`

// Benchmarks don't need strict docs
#![allow(missing_docs)]
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use banque_ui::{
    ClockSource, Document, ElementSpec, LineSink, ManualClock, MemorySink, TimerQueue, UiConfig,
    UpdateDriver,
};
use chrono::{FixedOffset, TimeZone};

/// Benchmark: scheduling one-shot timers.
fn bench_set_timeout(c: &mut Criterion) {
    c.bench_function("set_timeout", |b| {
        let mut timers: TimerQueue<u64> = TimerQueue::new();
        let mut i = 0u64;
        b.iter(|| {
            i += 1;
            black_box(timers.set_timeout(Duration::from_millis(i % 1000), |n: &mut u64| *n += 1));
        });
    });
}

/// Benchmark: draining staggered timeouts in one advance.
fn bench_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("drain_staggered");

    for size in [100u64, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let mut timers: TimerQueue<u64> = TimerQueue::new();
                for i in 0..size {
                    timers.set_timeout(Duration::from_millis(i * 200), |n: &mut u64| *n += 1);
                }
                let mut fired = 0u64;
                timers.advance_to(Duration::from_millis(size * 200), &mut fired);
                black_box(fired)
            });
        });
    }

    group.finish();
}

/// Benchmark: a clock interval over a simulated day.
fn bench_interval_day(c: &mut Criterion) {
    c.bench_function("interval_one_day", |b| {
        b.iter(|| {
            let mut timers: TimerQueue<u64> = TimerQueue::new();
            timers.set_interval(Duration::from_secs(60), |n: &mut u64| *n += 1);
            let mut ticks = 0u64;
            timers.advance_to(Duration::from_secs(86_400), &mut ticks);
            black_box(ticks)
        });
    });
}

/// Benchmark: content-loaded on a page with many cards and buttons.
fn bench_page_load(c: &mut Criterion) {
    let at = FixedOffset::east_opt(3600)
        .and_then(|tz| tz.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).single())
        .expect("valid instant");
    let specs: Vec<_> = (0..100)
        .map(|_| ElementSpec::new("div", &["card"]).child(ElementSpec::new("a", &["btn"])))
        .collect();

    c.bench_function("page_load_100_cards", |b| {
        b.iter(|| {
            let source: Arc<dyn ClockSource> = Arc::new(ManualClock::new(at));
            let sink: Arc<dyn LineSink> = Arc::new(MemorySink::new());
            let mut driver =
                UpdateDriver::new(&UiConfig::default(), source, sink).expect("driver");
            let mut doc = Document::from_specs(&specs);
            let mut timers = TimerQueue::new();
            black_box(driver.on_content_loaded(&mut doc, &mut timers).expect("load"))
        });
    });
}

criterion_group!(
    benches,
    bench_set_timeout,
    bench_drain,
    bench_interval_day,
    bench_page_load
);
criterion_main!(benches);
