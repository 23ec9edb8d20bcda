//! Match participants.

use derive_getters::Getters;
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of tiles every actor holds when a match starts.
pub const STARTING_TILES: u8 = 7;

/// Opaque actor identity, unique within a match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(String);

impl ActorId {
    /// Creates an actor id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ActorId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Who drives an actor's turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorKind {
    /// Local player; moves by selecting and confirming a tile.
    Human,
    /// Moves on its own after a delay.
    Automated,
}

/// A participant in a match.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Actor {
    /// Identity, unique within the match.
    id: ActorId,
    /// Presentation label.
    display_name: String,
    /// Human or automated.
    kind: ActorKind,
    /// Accumulated score; never decreases.
    score: u32,
    /// Tiles left in hand; floored at zero.
    tiles_remaining: u8,
    /// Whether this actor holds the turn.
    is_current_turn: bool,
}

impl Actor {
    /// Creates an actor with a full hand and no score.
    #[instrument(skip(display_name), fields(name = %display_name.as_ref()))]
    pub fn new(id: ActorId, display_name: impl AsRef<str>, kind: ActorKind) -> Self {
        Self {
            id,
            display_name: display_name.as_ref().to_string(),
            kind,
            score: 0,
            tiles_remaining: STARTING_TILES,
            is_current_turn: false,
        }
    }

    /// Returns true for the locally controlled actor.
    pub fn is_human(&self) -> bool {
        self.kind == ActorKind::Human
    }

    /// Returns true once the hand is empty.
    pub fn hand_is_empty(&self) -> bool {
        self.tiles_remaining == 0
    }

    /// Adds to the score and plays one tile.
    pub(crate) fn apply_move(&mut self, score_delta: u32) {
        self.score = self.score.saturating_add(score_delta);
        self.tiles_remaining = self.tiles_remaining.saturating_sub(1);
    }

    pub(crate) fn set_current_turn(&mut self, is_current_turn: bool) {
        self.is_current_turn = is_current_turn;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_move_floors_tiles_at_zero() {
        let mut actor = Actor::new("p1".into(), "You", ActorKind::Human);
        for _ in 0..10 {
            actor.apply_move(10);
        }
        assert_eq!(*actor.tiles_remaining(), 0);
        assert_eq!(*actor.score(), 100);
        assert!(actor.hand_is_empty());
    }
}
