//! Criterion bench for the availability walk: a realistic weekly schedule
//! expanded over a 30-day booking horizon.

use std::hint::black_box;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc, Weekday};
use criterion::{criterion_group, criterion_main, Criterion};
use slot_engine::{
    compute_availability, BookedInterval, LessonStatus, RecurringWindow, TeacherId,
};

const TEACHER: TeacherId = TeacherId(1);

fn hour(h: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, 0, 0).unwrap()
}

/// Morning and evening blocks on every weekday, afternoons on weekends.
fn weekly_schedule() -> Vec<RecurringWindow> {
    let mut windows = Vec::new();
    for weekday in [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ] {
        windows.push(RecurringWindow::new(TEACHER, weekday, hour(8), hour(12)).unwrap());
        windows.push(RecurringWindow::new(TEACHER, weekday, hour(17), hour(21)).unwrap());
    }
    for weekday in [Weekday::Sat, Weekday::Sun] {
        windows.push(RecurringWindow::new(TEACHER, weekday, hour(13), hour(18)).unwrap());
    }
    windows
}

/// A booked lesson every other day across the horizon.
fn booked_lessons(from: NaiveDate) -> Vec<BookedInterval> {
    (0..30)
        .step_by(2)
        .map(|day| {
            let start = (from + Duration::days(day)).and_time(hour(9)).and_utc();
            BookedInterval {
                teacher_id: TEACHER,
                start,
                end: Some(start + Duration::hours(1)),
                status: LessonStatus::Approved,
            }
        })
        .collect()
}

fn bench_compute_availability(c: &mut Criterion) {
    let date_from: NaiveDate = "2026-08-03".parse().unwrap();
    let date_to = date_from + Duration::days(29);
    let now: DateTime<Utc> = "2026-08-01T00:00:00Z".parse().unwrap();
    let windows = weekly_schedule();
    let booked = booked_lessons(date_from);

    c.bench_function("compute_availability_30_days", |b| {
        b.iter(|| {
            compute_availability(
                black_box(TEACHER),
                black_box(date_from),
                black_box(date_to),
                black_box(&windows),
                black_box(&booked),
                black_box(now),
            )
        })
    });
}

criterion_group!(benches, bench_compute_availability);
criterion_main!(benches);
