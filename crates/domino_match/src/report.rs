//! Summary handed to the results screen.

use crate::{ActorId, MatchEnded, MatchMode, Rewards, calculate_rewards};
use serde::{Deserialize, Serialize};

/// What the player sees after a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    /// Table mode.
    pub mode: MatchMode,
    /// Whether the human won.
    pub won: bool,
    /// Winning actor.
    pub winner: ActorId,
    /// Human's final score.
    pub player_score: u32,
    /// Best final score among the opponents.
    pub opponent_score: u32,
    /// Seconds played.
    pub game_time: u32,
    /// Payout.
    pub rewards: Rewards,
}

impl MatchReport {
    /// Builds the report from the terminal notification.
    pub fn new(mode: MatchMode, ended: &MatchEnded, human: &ActorId) -> Self {
        let won = &ended.winner == human;
        let player_score = ended.score_of(human).unwrap_or_default();
        let opponent_score = ended
            .final_scores
            .iter()
            .filter(|(id, _)| id != human)
            .map(|(_, score)| *score)
            .max()
            .unwrap_or_default();

        Self {
            mode,
            won,
            winner: ended.winner.clone(),
            player_score,
            opponent_score,
            game_time: ended.elapsed_seconds,
            rewards: calculate_rewards(mode, won),
        }
    }

    /// Game time as `m:ss`.
    pub fn formatted_time(&self) -> String {
        format_clock(self.game_time)
    }
}

impl std::fmt::Display for MatchReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", if self.won { "Victory!" } else { "Defeat" })?;
        writeln!(f, "Mode:      {}", self.mode)?;
        writeln!(f, "Score:     {} - {}", self.player_score, self.opponent_score)?;
        writeln!(f, "Time:      {}", self.formatted_time())?;
        writeln!(f, "Coins:     +{}", self.rewards.coins_earned)?;
        write!(f, "XP:        +{}", self.rewards.xp_earned)
    }
}

/// Formats seconds as `m:ss`.
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EndReason;

    #[test]
    fn report_picks_best_opponent() {
        let ended = MatchEnded {
            winner: "player3".into(),
            reason: EndReason::HandEmptied,
            final_scores: vec![
                ("player1".into(), 85),
                ("player2".into(), 90),
                ("player3".into(), 127),
                ("player4".into(), 40),
            ],
            elapsed_seconds: 380,
        };
        let report = MatchReport::new(MatchMode::FourPlayer, &ended, &"player1".into());
        assert!(!report.won);
        assert_eq!(report.player_score, 85);
        assert_eq!(report.opponent_score, 127);
        assert_eq!(report.formatted_time(), "6:20");
        assert_eq!(report.rewards.coins_earned, 200);
        assert_eq!(report.rewards.xp_earned, 30);
    }

    #[test]
    fn formats_clock() {
        assert_eq!(format_clock(245), "4:05");
        assert_eq!(format_clock(0), "0:00");
    }
}
