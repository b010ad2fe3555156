//! Board module - manages the game grid
//!
//! The board is an N×N grid where each cell holds a tile value (`0` = empty).
//! Uses a flat row-major vector; the size is fixed at construction.
//! Coordinates: (row, col) where row 0 is the top and col 0 is the left.

use std::fmt;

use crate::error::ConfigError;
use crate::line::can_merge;
use crate::types::{is_tile_value, Direction, Position, Tile, EMPTY, MAX_BOARD_SIZE, MIN_BOARD_SIZE};

/// The game board - N columns x N rows using flat storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    /// Flat array of cells, row-major order (row * size + col)
    cells: Vec<Tile>,
}

impl Board {
    /// Create a new empty board
    ///
    /// The size is clamped into the supported range; use [`crate::EngineConfig`]
    /// validation to reject bad sizes up front.
    pub fn new(size: usize) -> Self {
        let size = size.clamp(MIN_BOARD_SIZE, MAX_BOARD_SIZE);
        Self {
            size,
            cells: vec![EMPTY; size * size],
        }
    }

    /// Build a board from rows (top to bottom)
    ///
    /// Every row must have the same length as the number of rows and every
    /// non-zero value must be a power of two.
    pub fn from_rows(rows: &[Vec<Tile>]) -> Result<Self, ConfigError> {
        let size = rows.len();
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(ConfigError::BoardSize(size));
        }

        let mut cells = Vec::with_capacity(size * size);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != size {
                return Err(ConfigError::RaggedRow {
                    row,
                    len: values.len(),
                    expected: size,
                });
            }
            for (col, &v) in values.iter().enumerate() {
                if v != EMPTY && !is_tile_value(v) {
                    return Err(ConfigError::InvalidTile {
                        position: Position::new(row, col),
                        value: v,
                    });
                }
                cells.push(v);
            }
        }

        Ok(Self { size, cells })
    }

    /// Calculate flat index from a position
    #[inline(always)]
    fn index(&self, pos: Position) -> Option<usize> {
        if pos.row >= self.size || pos.col >= self.size {
            return None;
        }
        Some(pos.row * self.size + pos.col)
    }

    /// Edge length of the board
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get the tile at a position
    /// Returns None if out of bounds
    pub fn get(&self, pos: Position) -> Option<Tile> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    /// Set the tile at a position
    /// Returns false if out of bounds
    pub fn set(&mut self, pos: Position, value: Tile) -> bool {
        match self.index(pos) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and empty
    pub fn is_empty_at(&self, pos: Position) -> bool {
        matches!(self.get(pos), Some(EMPTY))
    }

    /// Row-major view of every cell
    pub fn cells(&self) -> &[Tile] {
        &self.cells
    }

    /// Copy out as rows (top to bottom)
    pub fn rows(&self) -> Vec<Vec<Tile>> {
        self.cells.chunks(self.size).map(<[Tile]>::to_vec).collect()
    }

    /// All empty positions in row-major order
    pub fn empty_cells(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v == EMPTY)
            .map(|(i, _)| Position::new(i / self.size, i % self.size))
            .collect()
    }

    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|&&v| v == EMPTY).count()
    }

    pub fn highest_tile(&self) -> Tile {
        self.cells.iter().copied().max().unwrap_or(EMPTY)
    }

    /// Sum of every tile value
    pub fn sum(&self) -> u64 {
        self.cells.iter().map(|&v| u64::from(v)).sum()
    }

    /// Grid position of the `offset`-th cell of line `index` in travel order.
    ///
    /// Lines are rows for Left/Right and columns for Up/Down; offset 0 is the
    /// leading edge of `dir` (the cell tiles slide toward).
    pub fn line_position(&self, dir: Direction, index: usize, offset: usize) -> Position {
        let along = if dir.is_reversed() {
            self.size - 1 - offset
        } else {
            offset
        };
        if dir.is_horizontal() {
            Position::new(index, along)
        } else {
            Position::new(along, index)
        }
    }

    /// Extract line `index` in travel order for `dir`
    pub fn line(&self, dir: Direction, index: usize) -> Vec<Tile> {
        (0..self.size)
            .map(|offset| self.cells[self.flat(self.line_position(dir, index, offset))])
            .collect()
    }

    /// Write `values` (travel order for `dir`) back into line `index`
    pub fn write_line(&mut self, dir: Direction, index: usize, values: &[Tile]) {
        debug_assert_eq!(values.len(), self.size);
        for (offset, &v) in values.iter().enumerate() {
            let idx = self.flat(self.line_position(dir, index, offset));
            self.cells[idx] = v;
        }
    }

    #[inline(always)]
    fn flat(&self, pos: Position) -> usize {
        pos.row * self.size + pos.col
    }

    /// Whether any horizontally or vertically adjacent pair could merge
    pub fn has_mergeable_neighbors(&self, cap: Option<Tile>) -> bool {
        let n = self.size;
        for row in 0..n {
            for col in 0..n {
                let v = self.cells[row * n + col];
                if v == EMPTY || !can_merge(v, cap) {
                    continue;
                }
                if col + 1 < n && self.cells[row * n + col + 1] == v {
                    return true;
                }
                if row + 1 < n && self.cells[(row + 1) * n + col] == v {
                    return true;
                }
            }
        }
        false
    }

    /// No empty cell and no legal merge left
    pub fn is_terminal(&self, cap: Option<Tile>) -> bool {
        self.count_empty() == 0 && !self.has_mergeable_neighbors(cap)
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(crate::types::DEFAULT_BOARD_SIZE)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.highest_tile().max(2).to_string().len();
        for row in self.cells.chunks(self.size) {
            let line: Vec<String> = row
                .iter()
                .map(|&v| {
                    if v == EMPTY {
                        format!("{:>width$}", ".")
                    } else {
                        format!("{:>width$}", v)
                    }
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_index_calculation() {
        let board = Board::new(4);
        assert_eq!(board.index(Position::new(0, 0)), Some(0));
        assert_eq!(board.index(Position::new(0, 3)), Some(3));
        assert_eq!(board.index(Position::new(1, 0)), Some(4));
        assert_eq!(board.index(Position::new(3, 3)), Some(15));
        assert_eq!(board.index(Position::new(4, 0)), None);
        assert_eq!(board.index(Position::new(0, 4)), None);
    }

    #[test]
    fn test_line_extraction_follows_travel_order() {
        let board = Board::from_rows(&[
            vec![1 << 1, 1 << 2, 1 << 3],
            vec![1 << 4, 1 << 5, 1 << 6],
            vec![1 << 7, 1 << 8, 1 << 9],
        ])
        .unwrap();

        assert_eq!(board.line(Direction::Left, 0), vec![2, 4, 8]);
        assert_eq!(board.line(Direction::Right, 0), vec![8, 4, 2]);
        assert_eq!(board.line(Direction::Up, 1), vec![4, 32, 256]);
        assert_eq!(board.line(Direction::Down, 1), vec![256, 32, 4]);
    }

    #[test]
    fn test_write_line_inverts_extraction() {
        let mut board = Board::new(3);
        board.write_line(Direction::Down, 2, &[2, 4, 0]);
        assert_eq!(board.get(Position::new(2, 2)), Some(2));
        assert_eq!(board.get(Position::new(1, 2)), Some(4));
        assert_eq!(board.get(Position::new(0, 2)), Some(0));
    }

    #[test]
    fn test_from_rows_rejects_bad_input() {
        assert!(matches!(
            Board::from_rows(&[vec![2, 2], vec![2]]),
            Err(ConfigError::RaggedRow { row: 1, .. })
        ));
        assert!(matches!(
            Board::from_rows(&[vec![2, 3], vec![0, 0]]),
            Err(ConfigError::InvalidTile { value: 3, .. })
        ));
        assert!(matches!(
            Board::from_rows(&[vec![2]]),
            Err(ConfigError::BoardSize(1))
        ));
    }

    #[test]
    fn test_display_renders_grid() {
        let board = Board::from_rows(&[vec![2, 0], vec![0, 16]]).unwrap();
        assert_eq!(board.to_string(), " 2  .\n . 16\n");
    }
}
