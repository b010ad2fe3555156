//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::GameAction`] and provides an
//! input gate that drops moves while a move transition is on screen.

pub mod gate;
pub mod map;

pub use tui_2048_types as types;

pub use gate::InputGate;
pub use map::{handle_key_event, should_quit};
