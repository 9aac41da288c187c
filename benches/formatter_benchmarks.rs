//! Criterion benchmarks for rust_logging_kit formatters

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_logging_kit::formatters::{strip_ansi, NotificationFormatter};
use rust_logging_kit::prelude::*;

fn sample_entries() -> Vec<(&'static str, LogEntry)> {
    vec![
        (
            "simple",
            LogEntry::new(LogLevel::INFO, "INFO", "bench.app", "request handled in 12ms"),
        ),
        (
            "raw_payload",
            LogEntry::new(LogLevel::NOTICE, "NOTICE", "bench.app", "payload received")
                .with_raw_payload("{\"id\": 1,\n \"items\": [1, 2, 3]}"),
        ),
        (
            "exception",
            LogEntry::new(LogLevel::ERROR, "ERROR", "bench.app", "call failed").with_exception(
                ExceptionInfo::new("Timeout", "upstream did not answer")
                    .with_cause("connection reset")
                    .with_backtrace("   0: bench::call\n   1: bench::main"),
            ),
        ),
    ]
}

// ============================================================================
// Text formatter benchmarks
// ============================================================================

fn bench_text_formatters(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_formatters");
    group.throughput(Throughput::Elements(1));

    let plain = PlainFormatter::new();
    let colour = ColourFormatter::new();

    for (label, entry) in sample_entries() {
        group.bench_function(format!("plain_{}", label), |b| {
            b.iter(|| black_box(plain.format(black_box(&entry))));
        });
        group.bench_function(format!("colour_{}", label), |b| {
            b.iter(|| black_box(colour.format(black_box(&entry))));
        });
    }

    let coloured = colour.format(&sample_entries()[2].1);
    group.bench_function("strip_ansi", |b| {
        b.iter(|| black_box(strip_ansi(black_box(&coloured))));
    });

    group.finish();
}

// ============================================================================
// Notification formatter benchmarks
// ============================================================================

fn bench_notification_formatter(c: &mut Criterion) {
    let mut group = c.benchmark_group("notification_formatter");
    group.throughput(Throughput::Elements(1));

    let formatter = NotificationFormatter::new();
    for (label, entry) in sample_entries() {
        group.bench_function(label, |b| {
            b.iter(|| black_box(formatter.format(black_box(&entry))));
        });
    }

    let oversized = LogEntry::new(LogLevel::WARNING, "WARNING", "bench.app", "x.y ".repeat(3000));
    group.bench_function("truncated", |b| {
        b.iter(|| black_box(formatter.format(black_box(&oversized))));
    });

    group.finish();
}

// ============================================================================
// Dispatch benchmarks
// ============================================================================

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    group.throughput(Throughput::Elements(1));

    let logger = Logger::builder().min_level(LogLevel::INFO).build();
    logger.registry().register_level("NOTICE", 25);

    group.bench_function("filtered_out", |b| {
        b.iter(|| logger.debug(black_box("not emitted")));
    });

    group.bench_function("no_appenders", |b| {
        b.iter(|| logger.notice(black_box("emitted nowhere")));
    });

    group.bench_function("log_named", |b| {
        b.iter(|| logger.log_named(black_box("notice"), "by name"));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_text_formatters,
    bench_notification_formatter,
    bench_dispatch
);
criterion_main!(benches);
