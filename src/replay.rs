//! Headless replay: apply a move string to a seeded game.

use anyhow::{bail, Result};
use log::{info, warn};

use tui_2048::core::{GameSnapshot, GameState};
use tui_2048::types::{Direction, GameAction};

/// Result of a replay run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayReport {
    pub seed: u64,
    /// Moves that changed the board
    pub moved: u32,
    /// Moves that changed nothing
    pub no_move: u32,
    pub undone: u32,
    pub snapshot: GameSnapshot,
}

/// Parse a move string: `L`, `R`, `U`, `D` slide, `Z` undoes.
///
/// Whitespace and commas are ignored so `"L R, U D"` and `"LRUD"` are equal.
pub fn parse_moves(moves: &str) -> Result<Vec<GameAction>> {
    let mut actions = Vec::with_capacity(moves.len());
    for (i, c) in moves.chars().enumerate() {
        if c.is_whitespace() || c == ',' {
            continue;
        }
        if c.eq_ignore_ascii_case(&'z') {
            actions.push(GameAction::Undo);
            continue;
        }
        match Direction::from_char(c) {
            Some(direction) => actions.push(direction.into()),
            None => bail!("invalid move {:?} at position {} (expected L, R, U, D or Z)", c, i),
        }
    }
    Ok(actions)
}

pub fn replay(game: &mut GameState, seed: u64, actions: &[GameAction]) -> ReplayReport {
    let mut report = ReplayReport {
        seed,
        moved: 0,
        no_move: 0,
        undone: 0,
        snapshot: GameSnapshot::default(),
    };

    for &action in actions {
        if action == GameAction::Undo {
            if game.undo() {
                report.undone += 1;
            } else {
                warn!("nothing to undo");
            }
            continue;
        }
        if game.apply_action(action) {
            report.moved += 1;
        } else {
            report.no_move += 1;
        }
    }

    info!(
        "replayed {} actions: {} moved, {} no-move, score {}",
        actions.len(),
        report.moved,
        report.no_move,
        game.score()
    );
    game.snapshot_into(&mut report.snapshot);
    report
}

impl ReplayReport {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "seed": self.seed,
            "moved": self.moved,
            "no_move": self.no_move,
            "undone": self.undone,
            "snapshot": self.snapshot,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_moves_accepts_letters_and_separators() {
        let actions = parse_moves("l R, u\td z").unwrap();
        assert_eq!(
            actions,
            vec![
                GameAction::MoveLeft,
                GameAction::MoveRight,
                GameAction::MoveUp,
                GameAction::MoveDown,
                GameAction::Undo,
            ]
        );
        assert!(parse_moves("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_moves_rejects_unknown() {
        let err = parse_moves("LRX").unwrap_err();
        assert!(err.to_string().contains("position 2"));
    }

    #[test]
    fn test_replay_is_deterministic_per_seed() {
        let actions = parse_moves("LURDLURDLURDDDLLRRUU").unwrap();
        let mut a = GameState::new(77);
        let mut b = GameState::new(77);

        let ra = replay(&mut a, 77, &actions);
        let rb = replay(&mut b, 77, &actions);
        assert_eq!(ra, rb);
        assert_eq!(ra.moved + ra.no_move, actions.len() as u32);
        assert_eq!(ra.snapshot.moves, ra.moved);
    }

    #[test]
    fn test_report_json_shape() {
        let mut game = GameState::new(5);
        let report = replay(&mut game, 5, &parse_moves("LR").unwrap());
        let json = report.to_json();
        assert_eq!(json["seed"], 5);
        assert_eq!(json["snapshot"]["size"], 4);
        assert_eq!(json["snapshot"]["cells"].as_array().unwrap().len(), 16);
    }
}
