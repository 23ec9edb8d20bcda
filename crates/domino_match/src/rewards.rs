//! Post-match payout.

use crate::MatchMode;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Coins and experience earned from one match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rewards {
    /// Soft currency earned.
    pub coins_earned: u32,
    /// Experience earned.
    pub xp_earned: u32,
}

/// Computes the payout for a finished match.
///
/// Winners receive the mode's base amounts. Losers receive 40% of the base
/// coins and 30% of the base experience, rounded down.
#[instrument]
pub fn calculate_rewards(mode: MatchMode, won: bool) -> Rewards {
    let coins = mode.base_coins();
    let xp = mode.base_xp();
    if won {
        Rewards {
            coins_earned: coins,
            xp_earned: xp,
        }
    } else {
        Rewards {
            coins_earned: coins * 2 / 5,
            xp_earned: xp * 3 / 10,
        }
    }
}
