//! Interactive session state: the engine plus everything the screen needs
//! that the engine does not own (transition gate, highlights, score history).

use log::{debug, info};

use tui_2048::core::{GameSnapshot, GameState, ScoreHistory};
use tui_2048::input::InputGate;
use tui_2048::term::ViewOverlay;
use tui_2048::types::{Direction, GameAction};

/// Ranked scores shown next to the board
const TOP_SCORES: usize = 5;

pub struct App {
    game: GameState,
    gate: InputGate,
    history: ScoreHistory,
    overlay: ViewOverlay,
    snapshot: GameSnapshot,
    /// Id of the last game whose score went into `history`
    recorded_game: Option<u32>,
}

impl App {
    pub fn new(game: GameState, transition_ms: u32) -> Self {
        let overlay = ViewOverlay {
            win_value: game.config().win_value,
            undo_enabled: game.config().undo_enabled,
            ..ViewOverlay::default()
        };
        let snapshot = game.snapshot();
        Self {
            game,
            gate: InputGate::with_transition_ms(transition_ms),
            history: ScoreHistory::new(),
            overlay,
            snapshot,
            recorded_game: None,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn history(&self) -> &ScoreHistory {
        &self.history
    }

    pub fn overlay(&self) -> &ViewOverlay {
        &self.overlay
    }

    /// Latest engine snapshot, refreshed after every action.
    pub fn snapshot(&self) -> &GameSnapshot {
        &self.snapshot
    }

    /// Route one input action through the gate into the engine.
    ///
    /// Returns true when the screen needs a redraw.
    pub fn handle_action(&mut self, action: GameAction) -> bool {
        let Some(action) = self.gate.admit(action) else {
            debug!("dropped {} during transition", action.as_str());
            return false;
        };

        let changed = match action {
            GameAction::Restart => {
                self.record_game();
                self.game.reset();
                self.gate.cancel();
                self.overlay.clear_highlights();
                self.overlay.won = false;
                true
            }
            GameAction::Undo => {
                let undone = self.game.undo();
                if undone {
                    self.overlay.clear_highlights();
                }
                undone
            }
            GameAction::MoveLeft
            | GameAction::MoveRight
            | GameAction::MoveUp
            | GameAction::MoveDown => action
                .direction()
                .map_or(false, |direction| self.apply_move(direction)),
        };

        if changed {
            self.game.snapshot_into(&mut self.snapshot);
        }
        changed
    }

    fn apply_move(&mut self, direction: Direction) -> bool {
        let outcome = self.game.apply_move(direction);
        if !outcome.moved {
            return false;
        }

        self.overlay.won = false;
        self.overlay.merged = outcome.merged;
        self.overlay.spawned = outcome.spawned.map(|s| s.position);
        self.gate.begin_transition();

        if self.game.consume_reached_target() {
            self.overlay.won = true;
        }
        if self.game.is_game_over() {
            self.record_game();
        }
        true
    }

    /// Advance timers. Returns true when highlights expired.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.gate.update(elapsed_ms) {
            self.overlay.clear_highlights();
            return true;
        }
        false
    }

    /// Put the current game into the history once.
    fn record_game(&mut self) {
        let id = self.game.game_id();
        if self.recorded_game == Some(id) {
            return;
        }
        if self.history.record(self.game.score()) {
            self.recorded_game = Some(id);
            self.overlay.best = self.history.best();
            self.overlay.top_scores = self.history.top(TOP_SCORES);
            info!("recorded game #{} with score {}", id, self.game.score());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tui_2048::core::{Board, EngineConfig};

    fn app_from(rows: &[Vec<u32>], score: u64, transition_ms: u32) -> App {
        let config = EngineConfig::default().with_board_size(rows.len());
        let board = Board::from_rows(rows).unwrap();
        let game = GameState::from_board(config, board, score, StdRng::seed_from_u64(3)).unwrap();
        App::new(game, transition_ms)
    }

    #[test]
    fn test_move_sets_highlights_until_transition_ends() {
        let mut app = app_from(&[vec![2, 2, 0, 0], vec![0; 4], vec![0; 4], vec![0; 4]], 0, 50);

        assert!(app.handle_action(GameAction::MoveLeft));
        assert_eq!(app.snapshot().score, 4);
        assert_eq!(app.overlay().merged.len(), 1);
        assert!(app.overlay().spawned.is_some());

        // Busy: the next move is dropped, not queued.
        assert!(!app.handle_action(GameAction::MoveRight));
        assert_eq!(app.snapshot().moves, 1);

        assert!(!app.tick(16));
        assert!(app.tick(40));
        assert!(!app.overlay().has_highlights());
    }

    #[test]
    fn test_restart_records_score_once() {
        let mut app = app_from(&[vec![2, 2, 0, 0], vec![0; 4], vec![0; 4], vec![0; 4]], 0, 0);
        assert!(app.handle_action(GameAction::MoveLeft));

        assert!(app.handle_action(GameAction::Restart));
        assert_eq!(app.history().len(), 1);
        assert_eq!(app.history().best(), Some(4));
        assert_eq!(app.overlay().best, Some(4));

        // Fresh game scores zero: nothing new to record.
        assert!(app.handle_action(GameAction::Restart));
        assert_eq!(app.history().len(), 1);
    }

    #[test]
    fn test_game_over_records_and_restart_does_not_duplicate() {
        // Merging the 2s leaves one gap; whatever spawns there has no equal
        // neighbour, so the game ends on this move.
        let mut app = app_from(
            &[
                vec![2, 2, 8, 16],
                vec![32, 64, 128, 256],
                vec![512, 1024, 8, 16],
                vec![32, 64, 128, 256],
            ],
            100,
            0,
        );

        assert!(app.handle_action(GameAction::MoveLeft));
        assert!(app.game().is_game_over());
        assert_eq!(app.history().len(), 1);
        assert_eq!(app.history().best(), Some(104));

        assert!(app.handle_action(GameAction::Restart));
        assert_eq!(app.history().len(), 1);
    }

    #[test]
    fn test_win_banner_raised_on_target_merge() {
        let config = EngineConfig::default().with_board_size(2).with_win_value(8);
        let board = Board::from_rows(&[vec![4, 4], vec![0, 0]]).unwrap();
        let game = GameState::from_board(config, board, 0, StdRng::seed_from_u64(9)).unwrap();
        let mut app = App::new(game, 0);

        assert!(app.handle_action(GameAction::MoveLeft));
        assert!(app.overlay().won);
        assert!(!app.game().reached_target());
    }

    #[test]
    fn test_undo_clears_highlights() {
        let mut app = app_from(&[vec![2, 2, 0, 0], vec![0; 4], vec![0; 4], vec![0; 4]], 0, 0);
        assert!(app.handle_action(GameAction::MoveLeft));
        assert!(app.handle_action(GameAction::Undo));
        assert_eq!(app.snapshot().score, 0);
        assert!(!app.overlay().has_highlights());
        assert!(!app.handle_action(GameAction::Undo));
    }
}
