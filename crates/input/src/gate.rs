//! Input gate for move transitions.
//!
//! After an applied move the front end plays a short highlight of the merged
//! and spawned tiles. Moves and undo arriving during that window are dropped,
//! never queued, so a burst of key repeats cannot stack up several slides the
//! player has not seen yet. Restart always passes.
//!
//! Time is fed in explicitly through [`InputGate::update`], which keeps the
//! gate deterministic under test.

use crate::types::{GameAction, DEFAULT_TRANSITION_MS};

/// Tracks whether a transition is in flight.
#[derive(Debug, Clone)]
pub struct InputGate {
    transition_ms: u32,
    remaining_ms: u32,
    dropped: u32,
}

impl Default for InputGate {
    fn default() -> Self {
        Self::new()
    }
}

impl InputGate {
    pub fn new() -> Self {
        Self::with_transition_ms(DEFAULT_TRANSITION_MS)
    }

    pub fn with_transition_ms(transition_ms: u32) -> Self {
        Self {
            transition_ms,
            remaining_ms: 0,
            dropped: 0,
        }
    }

    pub fn transition_ms(&self) -> u32 {
        self.transition_ms
    }

    pub fn is_busy(&self) -> bool {
        self.remaining_ms > 0
    }

    /// Milliseconds left in the current transition
    pub fn remaining_ms(&self) -> u32 {
        self.remaining_ms
    }

    /// Actions rejected since the gate was created
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Filter an incoming action. Returns `None` when it is dropped.
    pub fn admit(&mut self, action: GameAction) -> Option<GameAction> {
        if action == GameAction::Restart || !self.is_busy() {
            return Some(action);
        }
        self.dropped = self.dropped.saturating_add(1);
        None
    }

    /// Start the transition window. Call after a move that changed the grid.
    pub fn begin_transition(&mut self) {
        self.remaining_ms = self.transition_ms;
    }

    /// End any transition immediately (restart, undo).
    pub fn cancel(&mut self) {
        self.remaining_ms = 0;
    }

    /// Advance time. Returns true when a transition finished during this step.
    pub fn update(&mut self, elapsed_ms: u32) -> bool {
        if self.remaining_ms == 0 {
            return false;
        }
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
        self.remaining_ms == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_gate_admits_everything() {
        let mut gate = InputGate::with_transition_ms(100);
        assert!(!gate.is_busy());
        assert_eq!(gate.admit(GameAction::MoveLeft), Some(GameAction::MoveLeft));
        assert_eq!(gate.admit(GameAction::Undo), Some(GameAction::Undo));
        assert_eq!(gate.dropped(), 0);
    }

    #[test]
    fn test_busy_gate_drops_moves_and_undo() {
        let mut gate = InputGate::with_transition_ms(100);
        gate.begin_transition();

        assert_eq!(gate.admit(GameAction::MoveUp), None);
        assert_eq!(gate.admit(GameAction::MoveUp), None);
        assert_eq!(gate.admit(GameAction::Undo), None);
        assert_eq!(gate.dropped(), 3);

        // Dropped input is not replayed once the gate opens.
        assert!(gate.update(100));
        assert!(!gate.is_busy());
        assert_eq!(gate.dropped(), 3);
    }

    #[test]
    fn test_restart_passes_while_busy() {
        let mut gate = InputGate::with_transition_ms(100);
        gate.begin_transition();
        assert_eq!(gate.admit(GameAction::Restart), Some(GameAction::Restart));
        assert_eq!(gate.dropped(), 0);
    }

    #[test]
    fn test_update_counts_down() {
        let mut gate = InputGate::with_transition_ms(50);
        gate.begin_transition();

        assert!(!gate.update(16));
        assert_eq!(gate.remaining_ms(), 34);
        assert!(!gate.update(16));
        assert!(!gate.update(16));
        assert!(gate.update(16));
        assert_eq!(gate.remaining_ms(), 0);

        // Already idle: nothing finishes.
        assert!(!gate.update(16));
    }

    #[test]
    fn test_zero_transition_never_blocks() {
        let mut gate = InputGate::with_transition_ms(0);
        gate.begin_transition();
        assert!(!gate.is_busy());
        assert_eq!(gate.admit(GameAction::MoveDown), Some(GameAction::MoveDown));
    }

    #[test]
    fn test_cancel_opens_gate() {
        let mut gate = InputGate::new();
        gate.begin_transition();
        assert!(gate.is_busy());
        gate.cancel();
        assert!(!gate.is_busy());
    }
}
