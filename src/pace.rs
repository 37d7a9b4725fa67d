//! Pace profiles.
//!
//! A pace maps to a places-per-day soft target and the day's start and
//! target end hours. The soft target is informational only: overflow is
//! resolved by the time-budget simulator, not by truncation.

use serde::{Deserialize, Serialize};

/// Travel pace selected by the user. Aliases from the original config
/// vocabulary are accepted: `chill` = slow, `balanced` = medium,
/// `packed` = fast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pace {
    #[serde(alias = "chill")]
    Slow,
    #[default]
    #[serde(alias = "balanced")]
    Medium,
    #[serde(alias = "packed")]
    Fast,
}

impl Pace {
    /// Parses a pace name case-insensitively. Unknown names fall back
    /// to `Medium`, the behavior callers of the original config relied on.
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "slow" | "chill" => Self::Slow,
            "fast" | "packed" => Self::Fast,
            _ => Self::Medium,
        }
    }

    /// Soft target for places per day.
    pub const fn places_per_day(self) -> usize {
        match self {
            Self::Slow => 3,
            Self::Medium => 5,
            Self::Fast => 8,
        }
    }

    /// Hour of day (0-23) the first visit starts.
    pub const fn start_hour(self) -> u32 {
        match self {
            Self::Slow => 11,
            Self::Medium => 9,
            Self::Fast => 7,
        }
    }

    /// Target hour of day by which the last visit should finish.
    pub const fn end_hour(self) -> u32 {
        match self {
            Self::Slow => 16,
            Self::Medium => 18,
            Self::Fast => 20,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Slow => "slow",
            Self::Medium => "medium",
            Self::Fast => "fast",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_names() {
        assert_eq!(Pace::parse("slow"), Pace::Slow);
        assert_eq!(Pace::parse("medium"), Pace::Medium);
        assert_eq!(Pace::parse("fast"), Pace::Fast);
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(Pace::parse("chill"), Pace::Slow);
        assert_eq!(Pace::parse("balanced"), Pace::Medium);
        assert_eq!(Pace::parse("packed"), Pace::Fast);
        assert_eq!(Pace::parse("PACKED"), Pace::Fast);
    }

    #[test]
    fn test_parse_unknown_falls_back_to_medium() {
        assert_eq!(Pace::parse("leisurely"), Pace::Medium);
        assert_eq!(Pace::parse(""), Pace::Medium);
    }

    #[test]
    fn test_profile_values() {
        assert_eq!(Pace::Slow.places_per_day(), 3);
        assert_eq!(Pace::Medium.start_hour(), 9);
        assert_eq!(Pace::Fast.end_hour(), 20);
    }
}
