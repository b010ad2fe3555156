//! Spawn module - random tile placement
//!
//! After every applied move (and when a board is set up) one tile appears in a
//! uniformly chosen empty cell. Its value is the "high probability" value
//! (2 by default, 90% of the time) or the "low probability" value (4).
//!
//! All randomness in the engine flows through here and comes from a caller
//! supplied [`rand::Rng`], so a seeded `StdRng` gives fully repeatable games.

use log::trace;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::types::{Position, Tile};

/// Value distribution for spawned tiles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnPolicy {
    pub high_value: Tile,
    pub low_value: Tile,
    pub high_probability: f64,
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        crate::EngineConfig::default().spawn_policy()
    }
}

/// A tile placed by the spawn rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpawnedTile {
    pub position: Position,
    pub value: Tile,
}

impl SpawnPolicy {
    /// Draw a spawn value
    pub fn choose_value<R: Rng + ?Sized>(&self, rng: &mut R) -> Tile {
        if rng.gen::<f64>() < self.high_probability {
            self.high_value
        } else {
            self.low_value
        }
    }

    /// Place one tile into a random empty cell.
    ///
    /// Returns `None` (and leaves the board untouched) when the board is full.
    pub fn spawn_into<R: Rng + ?Sized>(&self, board: &mut Board, rng: &mut R) -> Option<SpawnedTile> {
        let empty = board.empty_cells();
        if empty.is_empty() {
            return None;
        }

        let position = empty[rng.gen_range(0..empty.len())];
        let value = self.choose_value(rng);
        board.set(position, value);
        trace!("spawned {} at ({}, {})", value, position.row, position.col);

        Some(SpawnedTile { position, value })
    }
}
