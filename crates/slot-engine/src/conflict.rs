//! Match candidate slots against existing bookings.
//!
//! Bookings are indexed once per request. Under [`ConflictPolicy::ExactStart`]
//! only the booking start instants matter; under [`ConflictPolicy::Overlap`]
//! bookings are merged into sorted, non-overlapping busy periods and a slot
//! conflicts when it overlaps one of them. Adjacent intervals (one ends
//! exactly when the other starts) are NOT conflicts.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ConflictPolicy;
use crate::error::Result;
use crate::slots::GeneratedSlot;

/// A confirmed booking occupying tutor time, in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookedInterval {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl BookedInterval {
    /// Parse a JSON array of `{startTime, endTime}` objects.
    pub fn list_from_json(json: &str) -> Result<Vec<BookedInterval>> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Bookings prepared for repeated conflict lookups.
#[derive(Debug, Clone)]
pub enum BookedIndex {
    ExactStart(BTreeSet<DateTime<Utc>>),
    /// Merged busy periods, sorted by start.
    Overlap(Vec<(DateTime<Utc>, DateTime<Utc>)>),
}

impl BookedIndex {
    pub fn new(booked: &[BookedInterval], policy: ConflictPolicy) -> Self {
        match policy {
            ConflictPolicy::ExactStart => {
                BookedIndex::ExactStart(booked.iter().map(|b| b.start_time).collect())
            }
            ConflictPolicy::Overlap => BookedIndex::Overlap(merge_busy_periods(booked)),
        }
    }

    /// Whether `slot` collides with any booking under this index's policy.
    pub fn conflicts_with(&self, slot: &GeneratedSlot) -> bool {
        match self {
            BookedIndex::ExactStart(starts) => starts.contains(&slot.start_time),
            BookedIndex::Overlap(periods) => {
                // First period ending after the slot starts is the only candidate.
                let idx = periods.partition_point(|&(_, end)| end <= slot.start_time);
                periods
                    .get(idx)
                    .is_some_and(|&(start, _)| start < slot.end_time)
            }
        }
    }
}

/// Merge overlapping or adjacent bookings into sorted, disjoint periods.
///
/// Zero-length or inverted bookings occupy no time and are dropped.
fn merge_busy_periods(booked: &[BookedInterval]) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
    let mut intervals: Vec<(DateTime<Utc>, DateTime<Utc>)> = booked
        .iter()
        .filter(|b| b.start_time < b.end_time)
        .map(|b| (b.start_time, b.end_time))
        .collect();

    intervals.sort_by_key(|&(start, end)| (start, end));

    let mut merged: Vec<(DateTime<Utc>, DateTime<Utc>)> = Vec::new();
    for (start, end) in intervals {
        if let Some(last) = merged.last_mut() {
            if start <= last.1 {
                last.1 = last.1.max(end);
                continue;
            }
        }
        merged.push((start, end));
    }

    merged
}
