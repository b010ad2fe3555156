//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no game logic, making them usable in any
//! context (core engine, terminal rendering, input mapping, headless replay).
//!
//! # Board Geometry
//!
//! The playfield is an `N×N` grid of cells:
//!
//! - **Default size**: 4 (the classic 4x4 board)
//! - **Supported sizes**: 2 through 16
//! - **Coordinates**: `(row, col)`, row 0 is the top, col 0 is the left
//!
//! # Gameplay Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_WIN_VALUE` | 2048 | Merge result that counts as reaching the target |
//! | `DEFAULT_SPAWN_HIGH_VALUE` | 2 | Common spawn value |
//! | `DEFAULT_SPAWN_LOW_VALUE` | 4 | Rare spawn value |
//! | `DEFAULT_SPAWN_HIGH_PROBABILITY` | 0.9 | Chance of the common value |
//! | `DEFAULT_INITIAL_TILES` | 2 | Tiles placed on a fresh board |
//!
//! # Presentation Timing
//!
//! Timing values are in milliseconds and only matter to the terminal front end:
//!
//! - `TICK_MS`: 16ms - input poll / frame interval
//! - `DEFAULT_TRANSITION_MS`: 120ms - highlight shown after a move; input is gated meanwhile
//!
//! # Examples
//!
//! ```
//! use tui_2048_types::{Direction, GameAction, Position, DEFAULT_BOARD_SIZE};
//!
//! // Parse a direction (case-insensitive, long or short form)
//! assert_eq!(Direction::from_str("left"), Some(Direction::Left));
//! assert_eq!(Direction::from_str("U"), Some(Direction::Up));
//!
//! // Map an action to its direction
//! assert_eq!(GameAction::MoveDown.direction(), Some(Direction::Down));
//! assert_eq!(GameAction::Undo.direction(), None);
//!
//! let p = Position::new(1, 2);
//! assert_eq!((p.row, p.col), (1, 2));
//! assert_eq!(DEFAULT_BOARD_SIZE, 4);
//! ```

use serde::{Deserialize, Serialize};

/// A cell value. `0` is empty; anything else is a power of two.
pub type Tile = u32;

/// Value of an empty cell
pub const EMPTY: Tile = 0;

/// Default board edge length (4x4)
pub const DEFAULT_BOARD_SIZE: usize = 4;

/// Smallest supported board edge length
pub const MIN_BOARD_SIZE: usize = 2;

/// Largest supported board edge length
pub const MAX_BOARD_SIZE: usize = 16;

/// Merge result that counts as reaching the target
pub const DEFAULT_WIN_VALUE: Tile = 2048;

/// Value spawned most of the time
pub const DEFAULT_SPAWN_HIGH_VALUE: Tile = 2;

/// Value spawned the rest of the time
pub const DEFAULT_SPAWN_LOW_VALUE: Tile = 4;

/// Probability of spawning [`DEFAULT_SPAWN_HIGH_VALUE`]
pub const DEFAULT_SPAWN_HIGH_PROBABILITY: f64 = 0.9;

/// Number of tiles placed on a fresh board
pub const DEFAULT_INITIAL_TILES: usize = 2;

/// Input poll / frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Duration of the post-move highlight, during which input is dropped
pub const DEFAULT_TRANSITION_MS: u32 = 120;

/// Returns true for `2, 4, 8, …` (and false for `0` and `1`).
#[inline]
pub fn is_tile_value(v: Tile) -> bool {
    v >= 2 && v.is_power_of_two()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_defaults() {
        assert_eq!(DEFAULT_BOARD_SIZE, 4);
        assert_eq!(DEFAULT_WIN_VALUE, 2048);
        assert_eq!(DEFAULT_SPAWN_HIGH_VALUE, 2);
        assert_eq!(DEFAULT_SPAWN_LOW_VALUE, 4);
        assert_eq!(DEFAULT_INITIAL_TILES, 2);
        assert!((DEFAULT_SPAWN_HIGH_PROBABILITY - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn tile_value_check() {
        assert!(!is_tile_value(0));
        assert!(!is_tile_value(1));
        assert!(is_tile_value(2));
        assert!(is_tile_value(2048));
        assert!(!is_tile_value(6));
        assert!(!is_tile_value(3));
    }

    #[test]
    fn direction_parse_roundtrip_names() {
        for d in Direction::ALL {
            assert_eq!(Direction::from_str(d.as_str()), Some(d));
        }
        assert_eq!(Direction::from_str("sideways"), None);
    }

    #[test]
    fn direction_from_letter() {
        assert_eq!(Direction::from_char('L'), Some(Direction::Left));
        assert_eq!(Direction::from_char('r'), Some(Direction::Right));
        assert_eq!(Direction::from_char('u'), Some(Direction::Up));
        assert_eq!(Direction::from_char('D'), Some(Direction::Down));
        assert_eq!(Direction::from_char('x'), None);
    }
}

/// Cell coordinate on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// The four slide directions
///
/// - **Left / Right**: every row slides horizontally
/// - **Up / Down**: every column slides vertically
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// All directions, in a fixed order
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Parse direction from string
    ///
    /// Accepts full names or single letters (case-insensitive):
    /// "left" | "l", "right" | "r", "up" | "u", "down" | "d"
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            _ => None,
        }
    }

    /// Parse a single-letter direction (`L`, `R`, `U`, `D`, case-insensitive)
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'l' => Some(Direction::Left),
            'r' => Some(Direction::Right),
            'u' => Some(Direction::Up),
            'd' => Some(Direction::Down),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    /// True for Left/Right (lines are rows)
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// True when lines are read back-to-front (Right/Down)
    pub fn is_reversed(&self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }
}

/// Commands that can be applied to the game
///
/// These are produced by the input layer and consumed by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Slide all tiles left
    MoveLeft,
    /// Slide all tiles right
    MoveRight,
    /// Slide all tiles up
    MoveUp,
    /// Slide all tiles down
    MoveDown,
    /// Restore the state before the last applied move
    Undo,
    /// Start a new game
    Restart,
}

impl GameAction {
    /// The slide direction for move actions
    pub fn direction(&self) -> Option<Direction> {
        match self {
            GameAction::MoveLeft => Some(Direction::Left),
            GameAction::MoveRight => Some(Direction::Right),
            GameAction::MoveUp => Some(Direction::Up),
            GameAction::MoveDown => Some(Direction::Down),
            GameAction::Undo | GameAction::Restart => None,
        }
    }

    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_2048_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("undo"), Some(GameAction::Undo));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "moveup" => Some(GameAction::MoveUp),
            "movedown" => Some(GameAction::MoveDown),
            "undo" => Some(GameAction::Undo),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::MoveUp => "moveUp",
            GameAction::MoveDown => "moveDown",
            GameAction::Undo => "undo",
            GameAction::Restart => "restart",
        }
    }
}

impl From<Direction> for GameAction {
    fn from(value: Direction) -> Self {
        match value {
            Direction::Left => GameAction::MoveLeft,
            Direction::Right => GameAction::MoveRight,
            Direction::Up => GameAction::MoveUp,
            Direction::Down => GameAction::MoveDown,
        }
    }
}
