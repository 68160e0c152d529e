//! Month-view computation: the request a booking calendar makes on every
//! month navigation.

use chrono::{Duration, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use slot_engine::{
    compute_availability_for_month, BookedInterval, EngineConfig, TutorSchedulingProfile,
};
use std::hint::black_box;

fn busy_tutor() -> TutorSchedulingProfile {
    TutorSchedulingProfile::from_json(
        r#"{
            "timeZone": "America/Chicago",
            "bufferTime": 10,
            "sessionDuration": {"min": 30, "max": 60},
            "bookingWindow": {"minAdvanceNotice": 12, "maxAdvanceNotice": 60},
            "availability": [
                {"day": "monday", "startTime": "08:00", "endTime": "12:00"},
                {"day": "monday", "startTime": "13:00", "endTime": "20:00"},
                {"day": "tuesday", "startTime": "08:00", "endTime": "20:00"},
                {"day": "wednesday", "startTime": "08:00", "endTime": "20:00"},
                {"day": "thursday", "startTime": "08:00", "endTime": "20:00"},
                {"day": "friday", "startTime": "08:00", "endTime": "17:00"},
                {"day": "saturday", "startTime": "10:00", "endTime": "14:00"}
            ]
        }"#,
    )
    .expect("bench profile is valid")
}

fn bookings() -> Vec<BookedInterval> {
    let first = Utc.with_ymd_and_hms(2026, 4, 1, 13, 0, 0).unwrap();
    (0..200)
        .map(|i| {
            let start = first + Duration::minutes(40 * i * 3);
            BookedInterval {
                start_time: start,
                end_time: start + Duration::minutes(30),
            }
        })
        .collect()
}

fn bench_month(c: &mut Criterion) {
    let profile = busy_tutor();
    let booked = bookings();
    let now = Utc.with_ymd_and_hms(2026, 3, 20, 12, 0, 0).unwrap();

    for (name, config) in [
        ("month/exact_start", EngineConfig::default()),
        (
            "month/overlap",
            EngineConfig {
                conflict_policy: slot_engine::ConflictPolicy::Overlap,
                ..EngineConfig::default()
            },
        ),
    ] {
        c.bench_function(name, |b| {
            b.iter(|| {
                compute_availability_for_month(
                    black_box(&config),
                    black_box(&profile),
                    2026,
                    4,
                    black_box(&booked),
                    now,
                )
            })
        });
    }
}

criterion_group!(benches, bench_month);
criterion_main!(benches);
