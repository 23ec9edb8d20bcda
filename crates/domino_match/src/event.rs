//! Domain events emitted by session transitions.

use crate::{ActorId, MoveOutcome, TileId, TurnNumber};
use serde::{Deserialize, Serialize};

/// How a match came to an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// The clock ran out; highest score wins.
    #[display("time expired")]
    TimeExpired,
    /// An actor played their last tile and wins outright.
    #[display("hand emptied")]
    HandEmptied,
}

/// Terminal notification handed to the results collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEnded {
    /// Winning actor.
    pub winner: ActorId,
    /// Why the match ended.
    pub reason: EndReason,
    /// Every actor's score, in seat order.
    pub final_scores: Vec<(ActorId, u32)>,
    /// Seconds the clock ran before the end.
    pub elapsed_seconds: u32,
}

impl MatchEnded {
    /// Final score of `actor`, if seated.
    pub fn score_of(&self, actor: &ActorId) -> Option<u32> {
        self.final_scores
            .iter()
            .find(|(id, _)| id == actor)
            .map(|(_, score)| *score)
    }
}

/// Something that changed in the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MatchEvent {
    /// The clock went down by one second.
    Ticked {
        /// Seconds left after the tick.
        seconds_remaining: u32,
    },
    /// The human's selection changed; `None` means cleared.
    TileSelected {
        /// Tile now selected.
        tile: Option<TileId>,
    },
    /// A move was scored.
    MoveResolved(MoveOutcome),
    /// The turn moved to another actor.
    TurnPassed {
        /// Actor now holding the turn.
        actor: ActorId,
        /// That actor's seat index.
        index: usize,
        /// Turn number after passing.
        turn: TurnNumber,
    },
    /// The clock was suspended.
    Paused,
    /// The clock was resumed.
    Resumed,
    /// The match is over.
    MatchEnded(MatchEnded),
}

impl MatchEvent {
    /// Returns the terminal notification, if this is one.
    pub fn as_match_ended(&self) -> Option<&MatchEnded> {
        match self {
            Self::MatchEnded(ended) => Some(ended),
            _ => None,
        }
    }
}
