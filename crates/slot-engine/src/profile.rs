//! Tutor scheduling profiles: the wire model and its validated form.
//!
//! A [`TutorSchedulingProfile`] is what the profile source hands us, with
//! timezone, weekday and `HH:MM` fields still as raw strings. Resolving it
//! against an [`EngineConfig`] yields a [`ResolvedProfile`] whose fields are
//! parsed and checked; everything downstream works on the resolved form.

use chrono::{NaiveTime, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::config::{DurationPolicy, EngineConfig};
use crate::dst::DstPolicy;
use crate::error::{Result, SlotError};

/// Longest session or buffer accepted, in minutes (one day).
pub const MAX_SESSION_MINUTES: i64 = 24 * 60;

/// Furthest ahead a booking window may reach, in days (about five years).
pub const MAX_ADVANCE_DAYS: i64 = 5 * 366;

/// A recurring local-time window on one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyAvailabilityRule {
    /// Lowercase weekday name, e.g. `"monday"`.
    pub day: String,
    /// `HH:MM`, 24-hour, in the tutor's timezone.
    pub start_time: String,
    /// `HH:MM`, 24-hour, in the tutor's timezone.
    pub end_time: String,
    /// Informational only; slot length comes from the profile's session duration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot_duration: Option<i64>,
}

/// Allowed session length range, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDuration {
    pub min: i64,
    pub max: i64,
}

impl Default for SessionDuration {
    fn default() -> Self {
        Self { min: 60, max: 60 }
    }
}

/// How soon and how far ahead a slot may be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingWindow {
    /// Minimum lead time, in hours.
    pub min_advance_notice: i64,
    /// Maximum lead time, in days.
    pub max_advance_notice: i64,
}

impl Default for BookingWindow {
    fn default() -> Self {
        Self {
            min_advance_notice: 24,
            max_advance_notice: 30,
        }
    }
}

/// A tutor's scheduling configuration as stored by the profile source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorSchedulingProfile {
    /// IANA timezone identifier for every rule in `availability`.
    pub time_zone: String,
    /// Idle minutes between consecutive slots (positive).
    pub buffer_time: i64,
    #[serde(default)]
    pub session_duration: SessionDuration,
    #[serde(default)]
    pub booking_window: BookingWindow,
    #[serde(default)]
    pub availability: Vec<WeeklyAvailabilityRule>,
}

/// A weekly rule with its weekday and times parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRule {
    pub weekday: Weekday,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// A validated profile, ready for slot computation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProfile {
    pub time_zone: Tz,
    /// Rules in their original order.
    pub rules: Vec<ResolvedRule>,
    /// Effective session length in minutes, 1 to [`MAX_SESSION_MINUTES`].
    pub session_minutes: i64,
    /// Buffer between slots in minutes (always positive).
    pub buffer_minutes: i64,
    pub booking_window: BookingWindow,
    pub dst_policy: DstPolicy,
}

impl TutorSchedulingProfile {
    /// Parse a profile from its JSON wire form. Does not validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check the profile without keeping the parsed form.
    pub fn validate(&self) -> Result<()> {
        self.resolve(&EngineConfig::default()).map(|_| ())
    }

    /// Validate every field and produce the parsed form.
    ///
    /// The first offending field aborts resolution; a profile is never
    /// partially resolved.
    pub fn resolve(&self, config: &EngineConfig) -> Result<ResolvedProfile> {
        let time_zone = parse_timezone(&self.time_zone)?;

        let rules = self
            .availability
            .iter()
            .map(resolve_rule)
            .collect::<Result<Vec<_>>>()?;

        let SessionDuration { min, max } = self.session_duration;
        if min <= 0 || max <= 0 {
            return Err(SlotError::InvalidDuration(format!(
                "session duration must be positive (min {}, max {})",
                min, max
            )));
        }
        if max > MAX_SESSION_MINUTES {
            return Err(SlotError::InvalidDuration(format!(
                "max {} exceeds {} minutes",
                max, MAX_SESSION_MINUTES
            )));
        }
        if min > max {
            return Err(SlotError::InvalidDuration(format!(
                "min {} exceeds max {}",
                min, max
            )));
        }
        let session_minutes = match config.duration_policy {
            DurationPolicy::Min => min,
            DurationPolicy::Max => max,
            DurationPolicy::Fixed(minutes) if (1..=MAX_SESSION_MINUTES).contains(&minutes) => {
                minutes
            }
            DurationPolicy::Fixed(minutes) => {
                return Err(SlotError::InvalidDuration(format!(
                    "fixed duration must be 1-{} minutes, got {}",
                    MAX_SESSION_MINUTES, minutes
                )))
            }
        };

        if self.buffer_time <= 0 || self.buffer_time > MAX_SESSION_MINUTES {
            return Err(SlotError::InvalidBuffer(self.buffer_time));
        }

        let window = self.booking_window;
        if window.min_advance_notice < 0 {
            return Err(SlotError::InvalidBookingWindow(format!(
                "minAdvanceNotice must not be negative, got {} hours",
                window.min_advance_notice
            )));
        }
        if window.min_advance_notice > MAX_ADVANCE_DAYS * 24 {
            return Err(SlotError::InvalidBookingWindow(format!(
                "minAdvanceNotice of {} hours exceeds {} days",
                window.min_advance_notice, MAX_ADVANCE_DAYS
            )));
        }
        if window.max_advance_notice <= 0 || window.max_advance_notice > MAX_ADVANCE_DAYS {
            return Err(SlotError::InvalidBookingWindow(format!(
                "maxAdvanceNotice must be 1-{} days, got {}",
                MAX_ADVANCE_DAYS, window.max_advance_notice
            )));
        }

        Ok(ResolvedProfile {
            time_zone,
            rules,
            session_minutes,
            buffer_minutes: self.buffer_time,
            booking_window: window,
            dst_policy: config.dst_policy,
        })
    }
}

/// Parse an IANA timezone identifier.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| SlotError::InvalidTimezone(name.to_string()))
}

/// Parse a lowercase English weekday name (`"monday"` .. `"sunday"`).
pub fn parse_weekday(name: &str) -> Result<Weekday> {
    match name {
        "monday" => Ok(Weekday::Mon),
        "tuesday" => Ok(Weekday::Tue),
        "wednesday" => Ok(Weekday::Wed),
        "thursday" => Ok(Weekday::Thu),
        "friday" => Ok(Weekday::Fri),
        "saturday" => Ok(Weekday::Sat),
        "sunday" => Ok(Weekday::Sun),
        other => Err(SlotError::InvalidWeekday(other.to_string())),
    }
}

/// Parse a strict `HH:MM` 24-hour time of day.
pub fn parse_hhmm(value: &str) -> Result<NaiveTime> {
    let invalid = || SlotError::InvalidTime(value.to_string());

    let bytes = value.as_bytes();
    if !value.is_ascii() || bytes.len() != 5 || bytes[2] != b':' {
        return Err(invalid());
    }
    let digits = |s: &str| -> Option<u32> {
        if s.bytes().all(|b| b.is_ascii_digit()) {
            s.parse().ok()
        } else {
            None
        }
    };
    let hour = digits(&value[..2]).ok_or_else(invalid)?;
    let minute = digits(&value[3..]).ok_or_else(invalid)?;

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}

fn resolve_rule(rule: &WeeklyAvailabilityRule) -> Result<ResolvedRule> {
    let weekday = parse_weekday(&rule.day)?;
    let start = parse_hhmm(&rule.start_time)?;
    let end = parse_hhmm(&rule.end_time)?;
    if start >= end {
        return Err(SlotError::EmptyWindow {
            day: rule.day.clone(),
            start: rule.start_time.clone(),
            end: rule.end_time.clone(),
        });
    }
    Ok(ResolvedRule {
        weekday,
        start,
        end,
    })
}
