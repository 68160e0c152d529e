//! DST transition policies for anchoring wall-clock rule times to instants.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Longest DST gap we search across. Real-world gaps are 30 or 60 minutes.
const MAX_GAP_MINUTES: i64 = 180;

/// Policy for rule times that fall inside a DST gap
/// (e.g. 02:30 on a spring-forward night).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DstPolicy {
    /// Drop the window entirely.
    Skip,
    /// Move to the first valid wall-clock minute after the gap.
    #[default]
    ShiftForward,
}

/// Resolve a local date + time-of-day in `tz` to a single instant.
///
/// Ambiguous times (fall-back overlap) resolve to the earliest instant.
/// Nonexistent times follow `policy`; `None` means the time was skipped.
pub fn resolve_local(
    tz: Tz,
    date: NaiveDate,
    time: NaiveTime,
    policy: DstPolicy,
) -> Option<DateTime<Tz>> {
    let naive = date.and_time(time);
    if let Some(dt) = tz.from_local_datetime(&naive).earliest() {
        return Some(dt);
    }

    match policy {
        DstPolicy::Skip => None,
        DstPolicy::ShiftForward => (1..=MAX_GAP_MINUTES).find_map(|minutes| {
            naive
                .checked_add_signed(Duration::minutes(minutes))
                .and_then(|shifted| tz.from_local_datetime(&shifted).earliest())
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Timelike, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn plain_time_resolves_to_single_instant() {
        let dt = resolve_local(
            chrono_tz::America::New_York,
            date(2026, 3, 16),
            time(9, 0),
            DstPolicy::Skip,
        )
        .unwrap();
        // EDT (UTC-4) after the Mar 8 spring forward.
        assert_eq!(dt.with_timezone(&Utc).hour(), 13);
    }

    #[test]
    fn gap_time_is_skipped_under_skip_policy() {
        // 2026-03-08 02:30 does not exist in New York.
        let dt = resolve_local(
            chrono_tz::America::New_York,
            date(2026, 3, 8),
            time(2, 30),
            DstPolicy::Skip,
        );
        assert!(dt.is_none());
    }

    #[test]
    fn gap_time_shifts_to_end_of_gap() {
        let dt = resolve_local(
            chrono_tz::America::New_York,
            date(2026, 3, 8),
            time(2, 30),
            DstPolicy::ShiftForward,
        )
        .unwrap();
        assert_eq!((dt.hour(), dt.minute()), (3, 0));
        assert_eq!(dt.with_timezone(&Utc).hour(), 7);
    }

    #[test]
    fn ambiguous_time_takes_earliest_instant() {
        // 2026-11-01 01:30 happens twice in New York; EDT first (05:30 UTC).
        let dt = resolve_local(
            chrono_tz::America::New_York,
            date(2026, 11, 1),
            time(1, 30),
            DstPolicy::ShiftForward,
        )
        .unwrap();
        assert_eq!(dt.with_timezone(&Utc).hour(), 5);
    }
}
