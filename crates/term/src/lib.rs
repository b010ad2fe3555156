//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for the 2048 board. It avoids
//! widget/layout libraries and instead renders into a simple framebuffer that
//! is flushed to the terminal with crossterm.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Keep the view pure so layouts can be asserted in unit tests
//! - Repaint only the tiles a move actually changed

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_2048_core as core;
pub use tui_2048_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rect, Rgb, Weight};
pub use game_view::{tile_colors, BoardLayout, GameView, ViewOverlay, Viewport};
pub use renderer::{encode_full_into, encode_regions_into, TerminalRenderer};
