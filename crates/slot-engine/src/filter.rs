//! Constraint filtering: bookings, past times, and the booking window.

use chrono::{DateTime, TimeDelta, Utc};

use crate::config::ConflictPolicy;
use crate::conflict::{BookedIndex, BookedInterval};
use crate::profile::BookingWindow;
use crate::slots::GeneratedSlot;

/// Remove candidates that cannot be booked at `now`, using the
/// [`ConflictPolicy::ExactStart`] booking match.
///
/// See [`filter_slots_with_policy`].
pub fn filter_slots(
    candidates: &[GeneratedSlot],
    booked: &[BookedInterval],
    booking_window: &BookingWindow,
    now: DateTime<Utc>,
) -> Vec<GeneratedSlot> {
    let index = BookedIndex::new(booked, ConflictPolicy::ExactStart);
    filter_with_index(candidates, &index, booking_window, now)
}

/// Remove candidates that cannot be booked at `now`.
///
/// A candidate survives when:
/// - it does not conflict with a booking under `policy`,
/// - it starts strictly after `now`,
/// - it starts at least `minAdvanceNotice` hours after `now`,
/// - it starts no more than `maxAdvanceNotice` days after `now`.
///
/// The result is sorted by start time with duplicate starts removed, so
/// filtering an already-filtered list returns it unchanged.
pub fn filter_slots_with_policy(
    candidates: &[GeneratedSlot],
    booked: &[BookedInterval],
    booking_window: &BookingWindow,
    now: DateTime<Utc>,
    policy: ConflictPolicy,
) -> Vec<GeneratedSlot> {
    let index = BookedIndex::new(booked, policy);
    filter_with_index(candidates, &index, booking_window, now)
}

pub(crate) fn filter_with_index(
    candidates: &[GeneratedSlot],
    index: &BookedIndex,
    booking_window: &BookingWindow,
    now: DateTime<Utc>,
) -> Vec<GeneratedSlot> {
    // A minimum notice past the representable range admits nothing; a
    // maximum notice past it bounds nothing.
    let Some(earliest) = TimeDelta::try_hours(booking_window.min_advance_notice)
        .and_then(|notice| now.checked_add_signed(notice))
    else {
        return Vec::new();
    };
    let latest = TimeDelta::try_days(booking_window.max_advance_notice)
        .and_then(|notice| now.checked_add_signed(notice));

    let mut slots: Vec<GeneratedSlot> = candidates
        .iter()
        .filter(|slot| {
            slot.start_time > now
                && slot.start_time >= earliest
                && latest.is_none_or(|latest| slot.start_time <= latest)
                && !index.conflicts_with(slot)
        })
        .copied()
        .collect();

    slots.sort();
    slots.dedup();
    slots
}
