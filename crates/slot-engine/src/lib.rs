//! # slot-engine
//!
//! Bookable slot computation for tutor scheduling.
//!
//! Turns a tutor's recurring weekly availability (local `HH:MM` windows in an
//! IANA timezone), session length, buffer time and booking window into the
//! concrete slots a student can book, minus existing bookings and anything
//! in the past. The engine is pure and synchronous: callers fetch the
//! profile and bookings first and pass them in fully materialized.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::{NaiveDate, TimeZone, Utc};
//! use slot_engine::{compute_availability_for_range, DayStatus, TutorSchedulingProfile};
//!
//! let profile = TutorSchedulingProfile::from_json(r#"{
//!     "timeZone": "UTC",
//!     "bufferTime": 15,
//!     "sessionDuration": {"min": 60, "max": 60},
//!     "bookingWindow": {"minAdvanceNotice": 0, "maxAdvanceNotice": 30},
//!     "availability": [{"day": "monday", "startTime": "09:00", "endTime": "12:00"}]
//! }"#).unwrap();
//!
//! let monday = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
//! let now = Utc.with_ymd_and_hms(2026, 3, 15, 0, 0, 0).unwrap();
//! let days = compute_availability_for_range(&profile, monday, monday, &[], now).unwrap();
//!
//! assert_eq!(days[0].status, DayStatus::Available);
//! assert_eq!(days[0].slots.len(), 2); // 09:00-10:00, 10:15-11:15
//! ```
//!
//! ## Modules
//!
//! - [`profile`]: wire model, validation, resolved profile
//! - [`schedule`]: weekly rules → windows for one date
//! - [`slots`]: windows → candidate slots (duration + buffer tiling)
//! - [`filter`]: bookings, past-time and booking-window filtering
//! - [`conflict`]: booking lookup under exact-start or overlap policy
//! - [`availability`]: per-day classification over a range or month
//! - [`display`]: viewer-timezone rendering and the full report
//! - [`dst`]: DST gap policies
//! - [`config`]: engine policies
//! - [`error`]: error types

pub mod availability;
pub mod config;
pub mod conflict;
pub mod display;
pub mod dst;
pub mod error;
pub mod filter;
pub mod profile;
pub mod schedule;
pub mod slots;

pub use availability::{
    compute_availability_for_month, compute_availability_for_range,
    compute_availability_for_range_with, month_bounds, DayAvailability, DayStatus,
};
pub use config::{ConflictPolicy, DurationPolicy, EngineConfig};
pub use conflict::BookedInterval;
pub use display::{build_report, group_by_local_date, localize_slots, AvailabilityReport, DisplaySlot};
pub use dst::DstPolicy;
pub use error::{Result, SlotError};
pub use filter::{filter_slots, filter_slots_with_policy};
pub use profile::{
    BookingWindow, ResolvedProfile, SessionDuration, TutorSchedulingProfile,
    WeeklyAvailabilityRule, MAX_ADVANCE_DAYS, MAX_SESSION_MINUTES,
};
pub use schedule::{expand_daily_schedule, AnchoredWindow};
pub use slots::{generate_candidate_slots, GeneratedSlot};
