//! WASM bindings for slot-engine.
//!
//! The student booking calendar and the demo booking flow both call into
//! these exports instead of tiling slots themselves. Profiles, bookings and
//! reports cross the boundary as JSON strings with the same camelCase keys
//! the REST API uses.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/src/lib/slot-engine/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use slot_engine::{
    build_report, compute_availability_for_month, compute_availability_for_range_with,
    BookedInterval, EngineConfig, TutorSchedulingProfile,
};
use wasm_bindgen::prelude::*;

/// Engine options a booking page may pass; absent fields keep the defaults.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct OptionsInput {
    #[serde(default)]
    viewer_time_zone: Option<String>,
    /// `true` selects the demo-booking preset (fixed one-hour sessions).
    #[serde(default)]
    demo: bool,
    #[serde(default)]
    config: Option<EngineConfig>,
}

impl OptionsInput {
    fn parse(json: Option<&str>) -> Result<Self, String> {
        match json {
            Some(s) if !s.trim().is_empty() => {
                serde_json::from_str(s).map_err(|e| format!("Invalid options JSON: {}", e))
            }
            _ => Ok(Self::default()),
        }
    }

    fn engine_config(&self) -> EngineConfig {
        match (&self.config, self.demo) {
            (Some(config), _) => config.clone(),
            (None, true) => EngineConfig::demo_booking(),
            (None, false) => EngineConfig::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

/// Parse an ISO 8601 instant. Naive datetimes are taken as UTC.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc())
        .map_err(|e| format!("Invalid datetime '{}': {}", s, e))
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("Invalid date '{}': {}", s, e))
}

fn parse_profile(json: &str) -> Result<TutorSchedulingProfile, String> {
    TutorSchedulingProfile::from_json(json).map_err(|e| e.to_string())
}

fn parse_bookings(json: &str) -> Result<Vec<BookedInterval>, String> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }
    BookedInterval::list_from_json(json).map_err(|e| e.to_string())
}

// ---------------------------------------------------------------------------
// Native implementations (testable off-wasm)
// ---------------------------------------------------------------------------

fn availability_json(
    profile_json: &str,
    bookings_json: &str,
    start_date: &str,
    end_date: &str,
    now: &str,
    options_json: Option<&str>,
) -> Result<String, String> {
    let profile = parse_profile(profile_json)?;
    let booked = parse_bookings(bookings_json)?;
    let start = parse_date(start_date)?;
    let end = parse_date(end_date)?;
    let now = parse_datetime(now)?;
    let options = OptionsInput::parse(options_json)?;

    let days = compute_availability_for_range_with(
        &options.engine_config(),
        &profile,
        start,
        end,
        &booked,
        now,
    )
    .map_err(|e| e.to_string())?;
    let report = build_report(&profile, days, options.viewer_time_zone.as_deref())
        .map_err(|e| e.to_string())?;

    serde_json::to_string(&report).map_err(|e| format!("Serialization error: {}", e))
}

fn month_json(
    profile_json: &str,
    bookings_json: &str,
    year: i32,
    month: u32,
    now: &str,
    options_json: Option<&str>,
) -> Result<String, String> {
    let profile = parse_profile(profile_json)?;
    let booked = parse_bookings(bookings_json)?;
    let now = parse_datetime(now)?;
    let options = OptionsInput::parse(options_json)?;

    let days = compute_availability_for_month(
        &options.engine_config(),
        &profile,
        year,
        month,
        &booked,
        now,
    )
    .map_err(|e| e.to_string())?;
    let report = build_report(&profile, days, options.viewer_time_zone.as_deref())
        .map_err(|e| e.to_string())?;

    serde_json::to_string(&report).map_err(|e| format!("Serialization error: {}", e))
}

fn validate_json(profile_json: &str) -> Result<(), String> {
    parse_profile(profile_json)?
        .validate()
        .map_err(|e| e.to_string())
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Compute the availability report for `[startDate, endDate]`.
///
/// # Arguments
/// - `profile_json` -- `TutorSchedulingProfile` JSON
/// - `bookings_json` -- JSON array of `{startTime, endTime}` (empty string for none)
/// - `start_date`, `end_date` -- `YYYY-MM-DD`, inclusive, tutor timezone
/// - `now` -- ISO 8601 instant
/// - `options_json` -- optional `{viewerTimeZone, demo, config}`
#[wasm_bindgen(js_name = "computeAvailability")]
pub fn compute_availability(
    profile_json: &str,
    bookings_json: &str,
    start_date: &str,
    end_date: &str,
    now: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    availability_json(
        profile_json,
        bookings_json,
        start_date,
        end_date,
        now,
        options_json.as_deref(),
    )
    .map_err(|e| JsValue::from_str(&e))
}

/// Compute the availability report for one calendar month (`month` 1-12).
#[wasm_bindgen(js_name = "computeMonth")]
pub fn compute_month(
    profile_json: &str,
    bookings_json: &str,
    year: i32,
    month: u32,
    now: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    month_json(
        profile_json,
        bookings_json,
        year,
        month,
        now,
        options_json.as_deref(),
    )
    .map_err(|e| JsValue::from_str(&e))
}

/// Validate a profile before it is saved. Returns `"ok"` or throws the
/// first configuration error.
#[wasm_bindgen(js_name = "validateProfile")]
pub fn validate_profile(profile_json: &str) -> Result<String, JsValue> {
    validate_json(profile_json)
        .map(|()| "ok".to_string())
        .map_err(|e| JsValue::from_str(&e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE: &str = r#"{
        "timeZone": "UTC",
        "bufferTime": 15,
        "sessionDuration": {"min": 45, "max": 90},
        "bookingWindow": {"minAdvanceNotice": 24, "maxAdvanceNotice": 30},
        "availability": [{"day": "monday", "startTime": "09:00", "endTime": "12:00"}]
    }"#;

    fn report(json: &str) -> serde_json::Value {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn range_report_round_trips_through_json() {
        let out = availability_json(
            PROFILE,
            r#"[{"startTime":"2026-03-16T09:00:00Z","endTime":"2026-03-16T09:45:00Z"}]"#,
            "2026-03-16",
            "2026-03-17",
            "2026-03-15T00:00:00Z",
            None,
        )
        .unwrap();

        let value = report(&out);
        // 45-minute sessions: 09:00 (booked), 10:00, 11:00.
        assert_eq!(value["days"][0]["slots"].as_array().unwrap().len(), 2);
        assert_eq!(value["days"][1]["status"], "unavailable");
    }

    #[test]
    fn demo_option_uses_one_hour_sessions() {
        let out = availability_json(
            PROFILE,
            "",
            "2026-03-16",
            "2026-03-16",
            "2026-03-15T00:00:00",
            Some(r#"{"demo": true, "viewerTimeZone": "Asia/Kolkata"}"#),
        )
        .unwrap();

        let value = report(&out);
        assert_eq!(value["slots"].as_array().unwrap().len(), 2);
        assert_eq!(value["viewerTimeZone"], "Asia/Kolkata");
        assert_eq!(value["byViewerDate"]["2026-03-16"][0]["localStart"], "14:30");
    }

    #[test]
    fn month_report_has_every_day() {
        let out = month_json(PROFILE, "[]", 2026, 4, "2026-03-30T00:00:00Z", None).unwrap();
        assert_eq!(report(&out)["days"].as_array().unwrap().len(), 30);
    }

    #[test]
    fn errors_surface_as_messages() {
        let err = availability_json(
            PROFILE,
            "",
            "2026-03-17",
            "2026-03-16",
            "2026-03-15T00:00:00Z",
            None,
        )
        .unwrap_err();
        assert!(err.contains("Invalid range"), "got: {}", err);

        let err = validate_json(r#"{"timeZone": "Not/AZone", "bufferTime": 15}"#).unwrap_err();
        assert!(err.contains("Invalid timezone"), "got: {}", err);

        assert!(parse_date("16/03/2026").is_err());
        assert!(validate_json(PROFILE).is_ok());
    }
}
