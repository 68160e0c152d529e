//! Engine configuration.
//!
//! Policies that the booking flows historically disagreed on live here, so a
//! single engine can serve both the student-booking calendar and the demo
//! booking flow.

use serde::{Deserialize, Serialize};

use crate::dst::DstPolicy;

/// How a candidate slot is matched against booked intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Reject a candidate only when a booking starts at exactly the same instant.
    #[default]
    ExactStart,
    /// Reject a candidate whose half-open interval overlaps any booking.
    Overlap,
}

/// Which session length the engine tiles windows with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationPolicy {
    /// The profile's `sessionDuration.min`.
    #[default]
    Min,
    /// The profile's `sessionDuration.max`.
    Max,
    /// A fixed length in minutes, ignoring the profile range.
    Fixed(i64),
}

/// Configuration for availability computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub conflict_policy: ConflictPolicy,
    pub duration_policy: DurationPolicy,
    pub dst_policy: DstPolicy,
    /// Longest accepted request range, in days (inclusive of both ends).
    pub max_range_days: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            conflict_policy: ConflictPolicy::ExactStart,
            duration_policy: DurationPolicy::Min,
            dst_policy: DstPolicy::ShiftForward,
            max_range_days: 366,
        }
    }
}

impl EngineConfig {
    /// Preset for the demo-booking flow, which offers one-hour sessions
    /// regardless of the tutor's configured range.
    pub fn demo_booking() -> Self {
        Self {
            duration_policy: DurationPolicy::Fixed(60),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"conflict_policy":"overlap"}"#).unwrap();
        assert_eq!(config.conflict_policy, ConflictPolicy::Overlap);
        assert_eq!(config.duration_policy, DurationPolicy::Min);
        assert_eq!(config.max_range_days, 366);
    }

    #[test]
    fn fixed_duration_policy_parses() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"duration_policy":{"fixed":45}}"#).unwrap();
        assert_eq!(config.duration_policy, DurationPolicy::Fixed(45));
    }

    #[test]
    fn demo_preset_uses_one_hour_sessions() {
        assert_eq!(
            EngineConfig::demo_booking().duration_policy,
            DurationPolicy::Fixed(60)
        );
    }
}
