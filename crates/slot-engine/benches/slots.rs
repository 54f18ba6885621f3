//! Benchmarks for slot generation and day classification.
//!
//! Run with `cargo bench -p slot-engine`.

use std::hint::black_box;

use chrono::{Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use slot_engine::{classify_day, generate_slots, BookedInterval, BookingStatus, WorkingHoursConfig};

fn dense_config() -> WorkingHoursConfig {
    WorkingHoursConfig {
        start: NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
        end: NaiveTime::from_hms_opt(23, 59, 0).unwrap(),
        meeting_duration_minutes: 15,
        buffer_minutes: 0,
        ..WorkingHoursConfig::default()
    }
}

fn bookings(count: usize) -> Vec<BookedInterval> {
    let first = Utc.with_ymd_and_hms(2026, 3, 16, 0, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let start = first + Duration::minutes(30 * i as i64);
            BookedInterval::new(start, start + Duration::minutes(15), BookingStatus::Confirmed)
        })
        .collect()
}

fn bench_generate(c: &mut Criterion) {
    let date = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
    let mut group = c.benchmark_group("generate_slots");

    let default_config = WorkingHoursConfig::default();
    group.bench_function("default_day_empty", |b| {
        b.iter(|| generate_slots(black_box(date), black_box(&default_config), &[]))
    });

    let config = dense_config();
    for count in [0usize, 8, 48] {
        let booked = bookings(count);
        group.bench_with_input(BenchmarkId::new("dense_day", count), &booked, |b, booked| {
            b.iter(|| generate_slots(black_box(date), black_box(&config), black_box(booked)))
        });
    }

    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let date = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
    let config = dense_config();
    let booked = bookings(48);

    c.bench_function("classify_day/dense_day", |b| {
        b.iter(|| classify_day(black_box(date), black_box(&config), black_box(&booked)))
    });
}

criterion_group!(benches, bench_generate, bench_classify);
criterion_main!(benches);
