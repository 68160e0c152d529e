//! Error types for slot-engine operations.
//!
//! Every failure is fatal for the whole request: the engine never returns a
//! partial availability view. Callers use [`SlotError::is_configuration_error`]
//! to tell a misconfigured tutor profile apart from a bad request range.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid weekday: {0}")]
    InvalidWeekday(String),

    /// A time-of-day string that is not `HH:MM` (24-hour).
    #[error("Invalid time of day: {0:?} (expected HH:MM)")]
    InvalidTime(String),

    /// A rule whose start is not strictly before its end.
    #[error("Empty availability window on {day}: {start}-{end}")]
    EmptyWindow {
        day: String,
        start: String,
        end: String,
    },

    #[error("Invalid session duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid buffer time: {0} minutes")]
    InvalidBuffer(i64),

    #[error("Invalid booking window: {0}")]
    InvalidBookingWindow(String),

    #[error("Invalid range: end date {end} is before start date {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Range of {days} days exceeds the maximum of {max}")]
    RangeTooLarge { days: i64, max: i64 },

    #[error("Invalid month: {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },

    /// The input document could not be deserialized.
    #[error("Malformed input: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl SlotError {
    /// True for errors caused by the tutor's scheduling profile (or the
    /// viewer timezone), as opposed to the requested range.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            SlotError::InvalidTimezone(_)
                | SlotError::InvalidWeekday(_)
                | SlotError::InvalidTime(_)
                | SlotError::EmptyWindow { .. }
                | SlotError::InvalidDuration(_)
                | SlotError::InvalidBuffer(_)
                | SlotError::InvalidBookingWindow(_)
        )
    }

    /// True for errors caused by the requested date range.
    pub fn is_range_error(&self) -> bool {
        matches!(
            self,
            SlotError::InvalidRange { .. }
                | SlotError::RangeTooLarge { .. }
                | SlotError::InvalidMonth { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SlotError>;
