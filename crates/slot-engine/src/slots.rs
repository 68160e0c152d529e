//! Candidate slot generation by greedy tiling of availability windows.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::schedule::AnchoredWindow;

/// One bookable candidate interval, in UTC.
///
/// Two slots are equal (and order, and hash) by `start_time` alone.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedSlot {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl GeneratedSlot {
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }
}

impl PartialEq for GeneratedSlot {
    fn eq(&self, other: &Self) -> bool {
        self.start_time == other.start_time
    }
}

impl Eq for GeneratedSlot {}

impl Hash for GeneratedSlot {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.start_time.hash(state);
    }
}

impl PartialOrd for GeneratedSlot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GeneratedSlot {
    fn cmp(&self, other: &Self) -> Ordering {
        self.start_time.cmp(&other.start_time)
    }
}

/// Tile each window with `[cursor, cursor + duration)` slots, advancing the
/// cursor by `duration + buffer`.
///
/// A candidate whose end would pass the window end is discarded, which ends
/// that window. Windows are processed in input order and slots stay
/// chronological within a window. Arithmetic is on absolute instants, so a
/// window spanning a DST change keeps real-time spacing.
///
/// A non-positive duration or buffer yields no candidates, as does one too
/// large to represent as a [`TimeDelta`].
pub fn generate_candidate_slots(
    windows: &[AnchoredWindow],
    session_duration_minutes: i64,
    buffer_minutes: i64,
) -> Vec<GeneratedSlot> {
    if session_duration_minutes <= 0 || buffer_minutes <= 0 {
        return Vec::new();
    }
    let (Some(duration), Some(step)) = (
        TimeDelta::try_minutes(session_duration_minutes),
        session_duration_minutes
            .checked_add(buffer_minutes)
            .and_then(TimeDelta::try_minutes),
    ) else {
        return Vec::new();
    };

    let mut slots = Vec::new();
    for window in windows {
        let window_end = window.end.with_timezone(&Utc);
        let mut cursor = window.start.with_timezone(&Utc);

        while let Some(end) = cursor.checked_add_signed(duration) {
            if end > window_end {
                break;
            }
            slots.push(GeneratedSlot {
                start_time: cursor,
                end_time: end,
            });
            match cursor.checked_add_signed(step) {
                Some(next) => cursor = next,
                None => break,
            }
        }
    }

    slots
}
