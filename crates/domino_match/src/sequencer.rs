//! Round-robin turn rotation.

use crate::ActorId;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Monotonic count of turns taken in a match; starts at zero.
pub type TurnNumber = u64;

/// Picks which actor acts next, in fixed seat order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnSequencer {
    order: Vec<ActorId>,
    index: usize,
    turn: TurnNumber,
}

impl TurnSequencer {
    /// Creates a sequencer over `order`, starting at seat 0.
    ///
    /// # Panics
    ///
    /// Panics if `order` is empty.
    pub fn new(order: Vec<ActorId>) -> Self {
        assert!(!order.is_empty(), "turn order needs at least one actor");
        Self {
            order,
            index: 0,
            turn: 0,
        }
    }

    /// Id of the actor holding the turn.
    pub fn current(&self) -> &ActorId {
        &self.order[self.index]
    }

    /// Seat index of the actor holding the turn.
    pub fn current_index(&self) -> usize {
        self.index
    }

    /// How many times the turn has passed.
    pub fn turn(&self) -> TurnNumber {
        self.turn
    }

    /// Number of seats in the rotation.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true for an empty rotation.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Passes the turn to the next seat, wrapping to the first.
    #[instrument(skip(self), fields(from = self.index))]
    pub fn advance(&mut self) -> &ActorId {
        self.index = (self.index + 1) % self.order.len();
        self.turn += 1;
        debug!(to = self.index, turn = self.turn, "Turn advanced");
        &self.order[self.index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "turn order needs at least one actor")]
    fn empty_order_panics() {
        TurnSequencer::new(Vec::new());
    }

    fn seats(n: usize) -> Vec<ActorId> {
        (1..=n).map(|i| ActorId::new(format!("player{i}"))).collect()
    }

    #[test]
    fn two_seats_alternate() {
        let mut seq = TurnSequencer::new(seats(2));
        assert_eq!(seq.current().as_str(), "player1");
        assert_eq!(seq.advance().as_str(), "player2");
        assert_eq!(seq.advance().as_str(), "player1");
        assert_eq!(seq.turn(), 2);
    }

    #[test]
    fn advance_k_times_lands_on_i_plus_k_mod_n() {
        for n in [2usize, 4] {
            for k in 0..13usize {
                let mut seq = TurnSequencer::new(seats(n));
                for _ in 0..k {
                    seq.advance();
                }
                assert_eq!(seq.current_index(), k % n);
                assert_eq!(seq.turn(), k as u64);
            }
        }
    }
}
