//! Construction errors.
//!
//! Gameplay itself never fails: a move that changes nothing and an undo with
//! nothing to restore are ordinary `false` results. Only building an engine
//! from caller-supplied configuration or a caller-supplied grid can be rejected.

use thiserror::Error;

use crate::types::{Position, Tile, MAX_BOARD_SIZE, MIN_BOARD_SIZE};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("board size {0} is outside {}..={}", MIN_BOARD_SIZE, MAX_BOARD_SIZE)]
    BoardSize(usize),

    #[error("row {row} has {len} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("board is {actual}x{actual} but the configuration asks for {expected}x{expected}")]
    BoardMismatch { expected: usize, actual: usize },

    #[error("cell ({}, {}) holds {value}, which is not a power of two >= 2", .position.row, .position.col)]
    InvalidTile { position: Position, value: Tile },

    #[error("spawn value {0} is not a power of two >= 2")]
    SpawnValue(Tile),

    #[error("spawn probability {0} is not within 0.0..=1.0")]
    SpawnProbability(f64),

    #[error("initial tile count {count} must be within 1..={max}")]
    InitialTiles { count: usize, max: usize },

    #[error("merge cap {0} is not a power of two >= 4")]
    MergeCap(Tile),

    #[error("win value {0} is not a power of two >= 4")]
    WinValue(Tile),
}
