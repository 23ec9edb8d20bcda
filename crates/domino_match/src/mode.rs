//! Match modes and their fixed parameters.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use strum::{Display, EnumIter, EnumString};

/// Which table the player sat down at.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Head-to-head against one automated opponent.
    #[default]
    OneOnOne,
    /// Four seats, three automated opponents.
    FourPlayer,
}

impl MatchMode {
    /// Number of seats at the table.
    pub fn actor_count(self) -> usize {
        match self {
            Self::OneOnOne => 2,
            Self::FourPlayer => 4,
        }
    }

    /// Default match length in seconds.
    pub fn time_budget(self) -> u32 {
        match self {
            Self::OneOnOne => 245,
            Self::FourPlayer => 480,
        }
    }

    /// Score awarded for a confirmed human move.
    pub fn human_score_range(self) -> RangeInclusive<u32> {
        match self {
            Self::OneOnOne => 10..=29,
            Self::FourPlayer => 15..=39,
        }
    }

    /// Score awarded for an automated move.
    pub fn automated_score_range(self) -> RangeInclusive<u32> {
        10..=29
    }

    /// Coins paid out for a win.
    pub fn base_coins(self) -> u32 {
        match self {
            Self::OneOnOne => 350,
            Self::FourPlayer => 500,
        }
    }

    /// Experience paid out for a win.
    pub fn base_xp(self) -> u32 {
        match self {
            Self::OneOnOne => 75,
            Self::FourPlayer => 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn parses_snake_case_names() {
        assert_eq!(MatchMode::from_str("one_on_one").unwrap(), MatchMode::OneOnOne);
        assert_eq!(MatchMode::from_str("four_player").unwrap(), MatchMode::FourPlayer);
        assert_eq!(MatchMode::FourPlayer.to_string(), "four_player");
        assert!(MatchMode::from_str("three_player").is_err());
    }
}
