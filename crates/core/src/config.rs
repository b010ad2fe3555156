//! Engine configuration.
//!
//! Every rule that varies between 2048 variants is a field here rather than a
//! hard-coded constant: board size, the optional merge cap, the target value,
//! the spawn distribution, how many tiles a fresh board starts with, and
//! whether undo is available.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::spawn::SpawnPolicy;
use crate::types::{
    is_tile_value, Tile, DEFAULT_BOARD_SIZE, DEFAULT_INITIAL_TILES, DEFAULT_SPAWN_HIGH_PROBABILITY,
    DEFAULT_SPAWN_HIGH_VALUE, DEFAULT_SPAWN_LOW_VALUE, DEFAULT_WIN_VALUE, MAX_BOARD_SIZE,
    MIN_BOARD_SIZE,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub board_size: usize,
    /// Largest value a merge may produce. `None` means unbounded.
    pub merge_cap: Option<Tile>,
    /// Merge result that raises the "target reached" flag.
    pub win_value: Tile,
    pub spawn_high_value: Tile,
    pub spawn_low_value: Tile,
    pub spawn_high_probability: f64,
    /// Tiles spawned by `new`/`reset`.
    pub initial_tiles: usize,
    /// Keep a single-level snapshot for `undo`.
    pub undo_enabled: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            merge_cap: None,
            win_value: DEFAULT_WIN_VALUE,
            spawn_high_value: DEFAULT_SPAWN_HIGH_VALUE,
            spawn_low_value: DEFAULT_SPAWN_LOW_VALUE,
            spawn_high_probability: DEFAULT_SPAWN_HIGH_PROBABILITY,
            initial_tiles: DEFAULT_INITIAL_TILES,
            undo_enabled: true,
        }
    }
}

impl EngineConfig {
    pub fn with_board_size(mut self, board_size: usize) -> Self {
        self.board_size = board_size;
        self
    }

    pub fn with_merge_cap(mut self, merge_cap: Option<Tile>) -> Self {
        self.merge_cap = merge_cap;
        self
    }

    pub fn with_win_value(mut self, win_value: Tile) -> Self {
        self.win_value = win_value;
        self
    }

    pub fn with_spawn(mut self, high_value: Tile, low_value: Tile, high_probability: f64) -> Self {
        self.spawn_high_value = high_value;
        self.spawn_low_value = low_value;
        self.spawn_high_probability = high_probability;
        self
    }

    pub fn with_initial_tiles(mut self, initial_tiles: usize) -> Self {
        self.initial_tiles = initial_tiles;
        self
    }

    pub fn with_undo(mut self, undo_enabled: bool) -> Self {
        self.undo_enabled = undo_enabled;
        self
    }

    /// Check every field; the first violation is returned.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(ConfigError::BoardSize(self.board_size));
        }
        for v in [self.spawn_high_value, self.spawn_low_value] {
            if !is_tile_value(v) {
                return Err(ConfigError::SpawnValue(v));
            }
        }
        let p = self.spawn_high_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::SpawnProbability(p));
        }
        let cells = self.board_size * self.board_size;
        if self.initial_tiles == 0 || self.initial_tiles > cells {
            return Err(ConfigError::InitialTiles {
                count: self.initial_tiles,
                max: cells,
            });
        }
        if let Some(cap) = self.merge_cap {
            if cap < 4 || !is_tile_value(cap) {
                return Err(ConfigError::MergeCap(cap));
            }
        }
        if self.win_value < 4 || !is_tile_value(self.win_value) {
            return Err(ConfigError::WinValue(self.win_value));
        }
        Ok(())
    }

    pub fn spawn_policy(&self) -> SpawnPolicy {
        SpawnPolicy {
            high_value: self.spawn_high_value,
            low_value: self.spawn_low_value,
            high_probability: self.spawn_high_probability,
        }
    }
}
