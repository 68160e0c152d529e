//! Viewer-timezone rendering and the full availability report.
//!
//! Slots are computed in the tutor's timezone and stored as UTC instants.
//! A student or demo visitor sees them in their own zone, where a slot may
//! land on a different calendar date than it does for the tutor.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::availability::DayAvailability;
use crate::error::Result;
use crate::profile::{parse_timezone, TutorSchedulingProfile};
use crate::slots::GeneratedSlot;

/// A slot as shown to a viewer in a specific timezone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySlot {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Viewer-local calendar date of the slot start.
    pub date: NaiveDate,
    /// Viewer-local `HH:MM`.
    pub local_start: String,
    /// Viewer-local `HH:MM`.
    pub local_end: String,
    pub time_zone: String,
}

/// Day-indexed availability plus the flat slot list and the viewer's view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityReport {
    /// The tutor's timezone; `days[].date` is in this zone.
    pub time_zone: String,
    pub viewer_time_zone: String,
    pub days: Vec<DayAvailability>,
    /// Every slot across all days, chronological.
    pub slots: Vec<GeneratedSlot>,
    /// Slots grouped by the viewer's local date.
    pub by_viewer_date: BTreeMap<NaiveDate, Vec<DisplaySlot>>,
}

/// Render `slots` in the timezone named `viewer_tz`.
///
/// # Errors
/// Returns `SlotError::InvalidTimezone` if `viewer_tz` is not an IANA zone.
pub fn localize_slots(slots: &[GeneratedSlot], viewer_tz: &str) -> Result<Vec<DisplaySlot>> {
    let tz = parse_timezone(viewer_tz)?;
    Ok(slots.iter().map(|slot| localize(slot, tz, viewer_tz)).collect())
}

/// Group `slots` by their start date in the viewer's timezone.
pub fn group_by_local_date(
    slots: &[GeneratedSlot],
    viewer_tz: &str,
) -> Result<BTreeMap<NaiveDate, Vec<DisplaySlot>>> {
    let mut grouped: BTreeMap<NaiveDate, Vec<DisplaySlot>> = BTreeMap::new();
    for slot in localize_slots(slots, viewer_tz)? {
        grouped.entry(slot.date).or_default().push(slot);
    }
    Ok(grouped)
}

/// Assemble the report for computed `days`.
///
/// `viewer_tz` defaults to the tutor's own timezone.
pub fn build_report(
    profile: &TutorSchedulingProfile,
    days: Vec<DayAvailability>,
    viewer_tz: Option<&str>,
) -> Result<AvailabilityReport> {
    let viewer_time_zone = viewer_tz.unwrap_or(&profile.time_zone).to_string();

    let mut slots: Vec<GeneratedSlot> = days.iter().flat_map(|d| d.slots.iter().copied()).collect();
    slots.sort();

    let by_viewer_date = group_by_local_date(&slots, &viewer_time_zone)?;

    Ok(AvailabilityReport {
        time_zone: profile.time_zone.clone(),
        viewer_time_zone,
        days,
        slots,
        by_viewer_date,
    })
}

fn localize(slot: &GeneratedSlot, tz: Tz, name: &str) -> DisplaySlot {
    let start = slot.start_time.with_timezone(&tz);
    let end = slot.end_time.with_timezone(&tz);
    DisplaySlot {
        start_time: slot.start_time,
        end_time: slot.end_time,
        date: start.date_naive(),
        local_start: start.format("%H:%M").to_string(),
        local_end: end.format("%H:%M").to_string(),
        time_zone: name.to_string(),
    }
}
