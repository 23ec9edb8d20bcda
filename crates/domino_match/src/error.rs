//! Rejected session transitions.

use crate::{ActorId, TileId, TurnNumber};

/// Why a transition was refused. A refused transition never mutates the session.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum TransitionError {
    /// The match has already ended.
    #[display("Match session already finished")]
    SessionFinished,

    /// The turn belongs to someone else.
    #[display("Not your turn: {} is to move", actor)]
    NotYourTurn {
        /// Actor who currently holds the turn.
        actor: ActorId,
    },

    /// Confirm was requested with nothing selected.
    #[display("No tile selected")]
    NoTileSelected,

    /// The tile is not in the human's hand.
    #[display("Tile {} is not in hand", tile)]
    TileNotInHand {
        /// Requested tile.
        tile: TileId,
    },

    /// Confirm named a different tile than the one selected.
    #[display("Tile {} is not the selected tile", tile)]
    TileNotSelected {
        /// Requested tile.
        tile: TileId,
    },

    /// A timer fired for a turn that has already passed.
    #[display("Stale turn timer: expected turn {}, got {}", expected, got)]
    StaleTurn {
        /// Turn the session is on.
        expected: TurnNumber,
        /// Turn the timer was armed for.
        got: TurnNumber,
    },

    /// Ticks and human moves are suspended while the match is paused.
    #[display("Match is paused")]
    Paused,
}

impl std::error::Error for TransitionError {}
