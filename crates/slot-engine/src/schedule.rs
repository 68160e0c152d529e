//! Recurring-rule expansion: weekly rules → concrete windows for one date.

use chrono::{DateTime, Datelike, NaiveDate};
use chrono_tz::Tz;

use crate::dst::resolve_local;
use crate::profile::ResolvedProfile;

/// One availability window anchored to a calendar date in the tutor's zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchoredWindow {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

/// Expand the profile's weekly rules for a single calendar date.
///
/// Every rule whose weekday matches `date` yields one window, in rule order.
/// No sorting is applied. A date with no matching rule yields an empty list.
///
/// Rule times are resolved in the profile's timezone; windows whose start or
/// end cannot be resolved under the profile's [`DstPolicy`](crate::DstPolicy),
/// or whose resolved end is not after the start, are dropped.
pub fn expand_daily_schedule(profile: &ResolvedProfile, date: NaiveDate) -> Vec<AnchoredWindow> {
    let weekday = date.weekday();
    let tz = profile.time_zone;

    profile
        .rules
        .iter()
        .filter(|rule| rule.weekday == weekday)
        .filter_map(|rule| {
            let start = resolve_local(tz, date, rule.start, profile.dst_policy)?;
            let end = resolve_local(tz, date, rule.end, profile.dst_policy)?;
            (start < end).then_some(AnchoredWindow { start, end })
        })
        .collect()
}
