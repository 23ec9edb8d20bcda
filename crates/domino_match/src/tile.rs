//! Domino tiles held by the human actor.
//!
//! Tiles carry no rules weight. They only give the player something to
//! select and confirm; playing one removes it from the hand.

use derive_more::Display;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// Identifier of a tile within the human's hand.
pub type TileId = u8;

/// A domino with two pip faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize, new)]
#[display("[{}|{}]", left, right)]
pub struct DominoTile {
    /// Identifier within the hand.
    pub id: TileId,
    /// Pips on the left face.
    pub left: u8,
    /// Pips on the right face.
    pub right: u8,
}

impl DominoTile {
    /// Total pips on both faces.
    pub fn pips(&self) -> u8 {
        self.left + self.right
    }

    /// Doubles show the same value on both faces.
    pub fn is_double(&self) -> bool {
        self.left == self.right
    }
}

/// The tiles the human still holds, in deal order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Hand {
    tiles: Vec<DominoTile>,
}

impl Hand {
    /// The fixed opening hand dealt to the human.
    pub fn starter() -> Self {
        Self {
            tiles: vec![
                DominoTile::new(1, 6, 4),
                DominoTile::new(2, 2, 3),
                DominoTile::new(3, 5, 1),
                DominoTile::new(4, 4, 4),
                DominoTile::new(5, 1, 6),
                DominoTile::new(6, 3, 2),
                DominoTile::new(7, 5, 5),
            ],
        }
    }

    /// Tiles in deal order.
    pub fn tiles(&self) -> &[DominoTile] {
        &self.tiles
    }

    /// Looks up a tile by id.
    pub fn get(&self, id: TileId) -> Option<&DominoTile> {
        self.tiles.iter().find(|t| t.id == id)
    }

    /// Returns true when the hand holds `id`.
    pub fn contains(&self, id: TileId) -> bool {
        self.get(id).is_some()
    }

    /// Removes and returns a tile.
    pub fn remove(&mut self, id: TileId) -> Option<DominoTile> {
        let index = self.tiles.iter().position(|t| t.id == id)?;
        Some(self.tiles.remove(index))
    }

    /// Number of tiles held.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Returns true when every tile has been played.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::STARTING_TILES;

    #[test]
    fn starter_hand_matches_starting_tile_count() {
        let hand = Hand::starter();
        assert_eq!(hand.len(), STARTING_TILES as usize);
        assert_eq!(hand.get(4).map(|t| t.is_double()), Some(true));
        assert_eq!(hand.get(1).map(|t| t.to_string()), Some("[6|4]".to_string()));
    }

    #[test]
    fn remove_takes_tile_out_once() {
        let mut hand = Hand::starter();
        assert_eq!(hand.remove(3).map(|t| t.pips()), Some(6));
        assert!(!hand.contains(3));
        assert!(hand.remove(3).is_none());
        assert_eq!(hand.len(), 6);
    }
}
