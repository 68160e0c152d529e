//! Day-by-day availability over a date range.
//!
//! This is the engine's main entry point. For every calendar date (in the
//! tutor's timezone) it expands the weekly rules, tiles the windows into
//! candidate slots, filters them, and classifies the day:
//!
//! - `past`: the date is before `now`'s date; takes precedence over all else
//! - `unavailable`: no rule matches the weekday, or no session fits
//! - `booked_solid`: candidates existed but every one was filtered out
//! - `available`: at least one slot survived filtering

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::conflict::{BookedIndex, BookedInterval};
use crate::error::{Result, SlotError};
use crate::filter::filter_with_index;
use crate::profile::TutorSchedulingProfile;
use crate::schedule::expand_daily_schedule;
use crate::slots::{generate_candidate_slots, GeneratedSlot};

/// Classification of a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    Available,
    BookedSolid,
    Unavailable,
    Past,
}

/// Bookable slots for one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub status: DayStatus,
    /// Chronological, distinct by start time.
    pub slots: Vec<GeneratedSlot>,
}

impl DayAvailability {
    pub fn is_bookable(&self) -> bool {
        self.status == DayStatus::Available
    }
}

/// Compute availability for every date in `[start_date, end_date]` with the
/// default [`EngineConfig`].
///
/// # Errors
/// Returns a range error if `end_date < start_date` or the range is too long,
/// and a configuration error if the profile is malformed. No days are
/// returned on error.
pub fn compute_availability_for_range(
    profile: &TutorSchedulingProfile,
    start_date: NaiveDate,
    end_date: NaiveDate,
    booked: &[BookedInterval],
    now: DateTime<Utc>,
) -> Result<Vec<DayAvailability>> {
    compute_availability_for_range_with(
        &EngineConfig::default(),
        profile,
        start_date,
        end_date,
        booked,
        now,
    )
}

/// Compute availability for every date in `[start_date, end_date]`.
///
/// Identical to [`compute_availability_for_range`] but with explicit
/// conflict, duration and DST policies.
#[tracing::instrument(skip_all, fields(tz = %profile.time_zone, start = %start_date, end = %end_date))]
pub fn compute_availability_for_range_with(
    config: &EngineConfig,
    profile: &TutorSchedulingProfile,
    start_date: NaiveDate,
    end_date: NaiveDate,
    booked: &[BookedInterval],
    now: DateTime<Utc>,
) -> Result<Vec<DayAvailability>> {
    if end_date < start_date {
        return Err(SlotError::InvalidRange {
            start: start_date,
            end: end_date,
        });
    }
    let days = (end_date - start_date).num_days() + 1;
    if days > config.max_range_days {
        return Err(SlotError::RangeTooLarge {
            days,
            max: config.max_range_days,
        });
    }

    let resolved = profile.resolve(config).inspect_err(|e| {
        tracing::debug!(error = %e, "rejected scheduling profile");
    })?;

    let today = now.with_timezone(&resolved.time_zone).date_naive();
    let index = BookedIndex::new(booked, config.conflict_policy);

    let result: Vec<DayAvailability> = start_date
        .iter_days()
        .take_while(|date| *date <= end_date)
        .map(|date| {
            let windows = expand_daily_schedule(&resolved, date);
            let candidates = generate_candidate_slots(
                &windows,
                resolved.session_minutes,
                resolved.buffer_minutes,
            );
            let slots = filter_with_index(&candidates, &index, &resolved.booking_window, now);

            let status = if date < today {
                DayStatus::Past
            } else if !slots.is_empty() {
                DayStatus::Available
            } else if !candidates.is_empty() {
                DayStatus::BookedSolid
            } else {
                DayStatus::Unavailable
            };

            DayAvailability { date, status, slots }
        })
        .collect();

    tracing::debug!(
        days = result.len(),
        bookable = result.iter().filter(|d| d.is_bookable()).count(),
        slots = result.iter().map(|d| d.slots.len()).sum::<usize>(),
        "computed availability"
    );

    Ok(result)
}

/// Compute availability for a whole calendar month (`month` is 1-12).
pub fn compute_availability_for_month(
    config: &EngineConfig,
    profile: &TutorSchedulingProfile,
    year: i32,
    month: u32,
    booked: &[BookedInterval],
    now: DateTime<Utc>,
) -> Result<Vec<DayAvailability>> {
    let (first, last) = month_bounds(year, month)?;
    compute_availability_for_range_with(config, profile, first, last, booked, now)
}

/// First and last date of a calendar month.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate)> {
    let invalid = || SlotError::InvalidMonth { year, month };

    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let last = next.and_then(|d| d.pred_opt()).ok_or_else(invalid)?;

    Ok((first, last))
}
