//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the board engine: grid state, the slide/merge rule,
//! random tile spawning, terminal detection and single-level undo.
//! It has **no dependencies** on UI, terminal or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Every rule is exercised by unit tests against explicit grids
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`board`]: N×N grid storage and line extraction in travel order
//! - [`line`]: The compress-and-merge rule for a single line
//! - [`game_state`]: The engine - moves, score, undo, win/lose flags
//! - [`spawn`]: Random tile placement (2 at 90%, 4 at 10% by default)
//! - [`config`]: Variant rules (board size, merge cap, spawn values, undo)
//! - [`snapshot`]: Read-only state copies for rendering and undo
//! - [`scores`]: Ranked history of finished games
//!
//! # Game Rules
//!
//! - **Slide**: every line moves toward the chosen edge; empty cells are squeezed out
//! - **Merge**: two equal neighbours combine once per move, scanning from the leading edge
//! - **Score**: each merge adds the value of the new tile
//! - **Spawn**: one tile appears after every move that changed the grid
//! - **Win**: a merge produces the target value (2048 unless configured)
//! - **Lose**: no empty cell and no adjacent equal pair
//!
//! # Example
//!
//! ```
//! use tui_2048_core::GameState;
//! use tui_2048_types::Direction;
//!
//! // Create a seeded classic game (two starting tiles)
//! let mut game = GameState::new(12345);
//! assert_eq!(game.board().count_empty(), 14);
//!
//! // Slide; a move that changes nothing reports `moved == false`
//! let outcome = game.apply_move(Direction::Left);
//! if outcome.moved {
//!     assert!(outcome.spawned.is_some());
//!     assert!(game.undo());
//! }
//!
//! assert_eq!(game.score(), 0);
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod game_state;
pub mod line;
pub mod scores;
pub mod snapshot;
pub mod spawn;

pub use tui_2048_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::EngineConfig;
pub use error::ConfigError;
pub use game_state::{GameState, MoveOutcome, TileMotion};
pub use line::{slide_line, LineShift, LineSlide};
pub use scores::{RankedScore, ScoreHistory};
pub use snapshot::{GameSnapshot, UndoSnapshot};
pub use spawn::{SpawnPolicy, SpawnedTile};
