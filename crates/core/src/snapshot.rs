use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::types::{Tile, DEFAULT_BOARD_SIZE, EMPTY};

/// State restored by `undo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoSnapshot {
    pub board: Board,
    pub score: u64,
    pub moves: u32,
    pub game_over: bool,
}

/// Read-only view handed to presentation and persistence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub size: usize,
    /// Row-major cell values, `size * size` long.
    pub cells: Vec<Tile>,
    pub score: u64,
    pub moves: u32,
    pub highest_tile: Tile,
    pub game_over: bool,
    pub reached_target: bool,
    pub can_undo: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.size = DEFAULT_BOARD_SIZE;
        self.cells.clear();
        self.cells.resize(DEFAULT_BOARD_SIZE * DEFAULT_BOARD_SIZE, EMPTY);
        self.score = 0;
        self.moves = 0;
        self.highest_tile = EMPTY;
        self.game_over = false;
        self.reached_target = false;
        self.can_undo = false;
    }

    pub fn tile(&self, row: usize, col: usize) -> Tile {
        if row >= self.size || col >= self.size {
            return EMPTY;
        }
        self.cells[row * self.size + col]
    }

    pub fn rows(&self) -> Vec<Vec<Tile>> {
        self.cells.chunks(self.size.max(1)).map(<[Tile]>::to_vec).collect()
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            size: DEFAULT_BOARD_SIZE,
            cells: Vec::new(),
            score: 0,
            moves: 0,
            highest_tile: EMPTY,
            game_over: false,
            reached_target: false,
            can_undo: false,
        };
        s.clear();
        s
    }
}

impl From<&Board> for GameSnapshot {
    fn from(board: &Board) -> Self {
        Self {
            size: board.size(),
            cells: board.cells().to_vec(),
            highest_tile: board.highest_tile(),
            ..Self::default()
        }
    }
}
