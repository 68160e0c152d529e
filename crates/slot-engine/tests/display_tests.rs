//! Tests for viewer-timezone rendering and report assembly.

use chrono::{NaiveDate, TimeZone, Utc};
use slot_engine::{
    build_report, compute_availability_for_range, group_by_local_date, localize_slots,
    GeneratedSlot, TutorSchedulingProfile,
};

fn new_york_tutor() -> TutorSchedulingProfile {
    TutorSchedulingProfile::from_json(
        r#"{
            "timeZone": "America/New_York",
            "bufferTime": 15,
            "sessionDuration": {"min": 60, "max": 60},
            "bookingWindow": {"minAdvanceNotice": 24, "maxAdvanceNotice": 30},
            "availability": [
                {"day": "monday", "startTime": "09:00", "endTime": "13:00"},
                {"day": "wednesday", "startTime": "18:00", "endTime": "19:00"}
            ]
        }"#,
    )
    .unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn slots_render_in_viewer_zone() {
    let slot = GeneratedSlot {
        start_time: Utc.with_ymd_and_hms(2026, 3, 16, 13, 0, 0).unwrap(),
        end_time: Utc.with_ymd_and_hms(2026, 3, 16, 14, 0, 0).unwrap(),
    };

    let shown = localize_slots(&[slot], "Asia/Tokyo").unwrap();

    assert_eq!(shown[0].date, date(2026, 3, 16));
    assert_eq!(shown[0].local_start, "22:00");
    assert_eq!(shown[0].local_end, "23:00");
    assert_eq!(shown[0].time_zone, "Asia/Tokyo");
    assert_eq!(shown[0].start_time, slot.start_time);
}

#[test]
fn viewer_grouping_can_cross_midnight() {
    let profile = new_york_tutor();
    let now = Utc.with_ymd_and_hms(2026, 3, 15, 0, 0, 0).unwrap();
    let days =
        compute_availability_for_range(&profile, date(2026, 3, 16), date(2026, 3, 16), &[], now)
            .unwrap();
    // 09:00, 10:15, 11:30 EDT = 13:00Z, 14:15Z, 15:30Z.
    assert_eq!(days[0].slots.len(), 3);

    let grouped = group_by_local_date(&days[0].slots, "Asia/Tokyo").unwrap();

    // 22:00 and 23:15 JST on the 16th, 00:30 JST on the 17th.
    assert_eq!(grouped.len(), 2);
    assert_eq!(grouped[&date(2026, 3, 16)].len(), 2);
    assert_eq!(grouped[&date(2026, 3, 17)][0].local_start, "00:30");
}

#[test]
fn report_flattens_days_and_defaults_viewer_to_tutor_zone() {
    let profile = new_york_tutor();
    let now = Utc.with_ymd_and_hms(2026, 3, 15, 0, 0, 0).unwrap();
    let days =
        compute_availability_for_range(&profile, date(2026, 3, 16), date(2026, 3, 22), &[], now)
            .unwrap();

    let report = build_report(&profile, days, None).unwrap();

    assert_eq!(report.viewer_time_zone, "America/New_York");
    assert_eq!(report.days.len(), 7);
    // Three Monday slots plus one Wednesday slot.
    assert_eq!(report.slots.len(), 4);
    for pair in report.slots.windows(2) {
        assert!(pair[0].start_time < pair[1].start_time);
    }
    assert_eq!(report.by_viewer_date.len(), 2);
    assert_eq!(report.by_viewer_date[&date(2026, 3, 18)][0].local_start, "18:00");
}

#[test]
fn report_serializes_with_camel_case_and_snake_case_status() {
    let profile = new_york_tutor();
    let now = Utc.with_ymd_and_hms(2026, 3, 15, 0, 0, 0).unwrap();
    let days =
        compute_availability_for_range(&profile, date(2026, 3, 16), date(2026, 3, 17), &[], now)
            .unwrap();
    let report = build_report(&profile, days, Some("Europe/London")).unwrap();

    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["viewerTimeZone"], "Europe/London");
    assert_eq!(json["days"][0]["date"], "2026-03-16");
    assert_eq!(json["days"][0]["status"], "available");
    assert_eq!(json["days"][1]["status"], "unavailable");
    assert_eq!(json["slots"][0]["startTime"], "2026-03-16T13:00:00Z");
    assert!(json["byViewerDate"]["2026-03-16"].is_array());
}

#[test]
fn unknown_viewer_zone_is_a_configuration_error() {
    let profile = new_york_tutor();
    let err = build_report(&profile, vec![], Some("Nowhere/Special")).unwrap_err();
    assert!(err.is_configuration_error());
}
