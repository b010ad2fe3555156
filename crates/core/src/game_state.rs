//! Game state module - the board engine
//!
//! This module ties together the board, the line slide rule, the spawn policy
//! and undo. It owns the grid and score exclusively; the only ways to change
//! them are the four directional moves, `undo` and `reset`.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::Board;
use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::line::slide_line;
use crate::snapshot::{GameSnapshot, UndoSnapshot};
use crate::spawn::{SpawnPolicy, SpawnedTile};
use crate::types::*;

/// One tile's travel during a move, for transition rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileMotion {
    pub from: Position,
    pub to: Position,
    /// Value the tile had before the move
    pub value: Tile,
    /// True when the tile combined with another at `to`
    pub merged: bool,
}

/// Everything a move did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub direction: Direction,
    /// Whether any line changed. When false nothing else in the state changed.
    pub moved: bool,
    /// Points gained by this move (sum of merge results)
    pub points: u64,
    /// Tiles that slid or merged; stationary tiles are omitted
    pub motions: Vec<TileMotion>,
    /// Cells holding a freshly merged tile
    pub merged: Vec<Position>,
    /// Tile added after the move
    pub spawned: Option<SpawnedTile>,
    /// A merge produced the configured win value
    pub reached_target: bool,
}

impl MoveOutcome {
    fn unmoved(direction: Direction) -> Self {
        Self {
            direction,
            moved: false,
            points: 0,
            motions: Vec::new(),
            merged: Vec::new(),
            spawned: None,
            reached_target: false,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R = StdRng> {
    config: EngineConfig,
    spawn: SpawnPolicy,
    board: Board,
    score: u64,
    /// Applied (grid-changing) moves in the current game.
    moves: u32,
    /// Monotonic game id (increments on reset).
    game_id: u32,
    game_over: bool,
    /// Raised when a merge produces `win_value`; cleared by `consume_reached_target`.
    target_reached: bool,
    previous: Option<UndoSnapshot>,
    rng: R,
}

impl GameState<StdRng> {
    /// Create a classic 4x4 game with the given RNG seed
    pub fn new(seed: u64) -> Self {
        Self::build(EngineConfig::default(), StdRng::seed_from_u64(seed))
    }

    /// Create a game with a custom configuration and a seeded `StdRng`
    pub fn with_seed(config: EngineConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_config(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameState<R> {
    /// Create a game with a custom configuration and random source
    pub fn with_config(config: EngineConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, rng))
    }

    /// Resume from an explicit grid and score.
    ///
    /// No tiles are spawned; the terminal flag is computed right away.
    pub fn from_board(
        config: EngineConfig,
        board: Board,
        score: u64,
        rng: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if board.size() != config.board_size {
            return Err(ConfigError::BoardMismatch {
                expected: config.board_size,
                actual: board.size(),
            });
        }

        let game_over = board.is_terminal(config.merge_cap);
        Ok(Self {
            spawn: config.spawn_policy(),
            config,
            board,
            score,
            moves: 0,
            game_id: 0,
            game_over,
            target_reached: false,
            previous: None,
            rng,
        })
    }

    fn build(config: EngineConfig, rng: R) -> Self {
        let mut state = Self {
            spawn: config.spawn_policy(),
            board: Board::new(config.board_size),
            config,
            score: 0,
            moves: 0,
            game_id: 0,
            game_over: false,
            target_reached: false,
            previous: None,
            rng,
        };
        state.spawn_initial_tiles();
        state
    }

    fn spawn_initial_tiles(&mut self) {
        for _ in 0..self.config.initial_tiles {
            self.spawn.spawn_into(&mut self.board, &mut self.rng);
        }
        self.game_over = self.board.is_terminal(self.config.merge_cap);
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn game_id(&self) -> u32 {
        self.game_id
    }

    pub fn highest_tile(&self) -> Tile {
        self.board.highest_tile()
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn can_undo(&self) -> bool {
        self.previous.is_some()
    }

    /// Peek at the "target reached" flag without clearing it
    pub fn reached_target(&self) -> bool {
        self.target_reached
    }

    /// Read and clear the "target reached" flag.
    ///
    /// It is raised again only by a later merge that produces the win value.
    pub fn consume_reached_target(&mut self) -> bool {
        std::mem::take(&mut self.target_reached)
    }

    /// Start a new game: empty grid, zero score, no undo, fresh initial tiles
    pub fn reset(&mut self) {
        self.board.clear();
        self.score = 0;
        self.moves = 0;
        self.game_id = self.game_id.wrapping_add(1);
        self.game_over = false;
        self.target_reached = false;
        self.previous = None;
        self.spawn_initial_tiles();
        info!("new game #{} ({}x{})", self.game_id, self.board.size(), self.board.size());
    }

    /// Place one random tile into an empty cell (no-op on a full board)
    pub fn spawn_random_tile(&mut self) -> Option<SpawnedTile> {
        let spawned = self.spawn.spawn_into(&mut self.board, &mut self.rng);
        self.game_over = self.board.is_terminal(self.config.merge_cap);
        spawned
    }

    pub fn move_left(&mut self) -> MoveOutcome {
        self.apply_move(Direction::Left)
    }

    pub fn move_right(&mut self) -> MoveOutcome {
        self.apply_move(Direction::Right)
    }

    pub fn move_up(&mut self) -> MoveOutcome {
        self.apply_move(Direction::Up)
    }

    pub fn move_down(&mut self) -> MoveOutcome {
        self.apply_move(Direction::Down)
    }

    /// Slide every line toward `direction`.
    ///
    /// All lines are computed against the current grid and written to a copy,
    /// which replaces the grid only if something changed. An unchanged move
    /// leaves grid, score, undo snapshot and flags exactly as they were.
    pub fn apply_move(&mut self, direction: Direction) -> MoveOutcome {
        let mut outcome = MoveOutcome::unmoved(direction);
        let cap = self.config.merge_cap;
        let mut next = self.board.clone();

        for index in 0..self.board.size() {
            let line = self.board.line(direction, index);
            let slide = slide_line(&line, cap);
            if !slide.changed {
                continue;
            }

            outcome.moved = true;
            outcome.points += slide.points;

            for shift in slide.shifts.iter().filter(|s| s.merged || s.from != s.to) {
                outcome.motions.push(TileMotion {
                    from: self.board.line_position(direction, index, shift.from),
                    to: self.board.line_position(direction, index, shift.to),
                    value: line[shift.from],
                    merged: shift.merged,
                });
            }
            for &to in &slide.merged {
                if slide.values[to] == self.config.win_value {
                    outcome.reached_target = true;
                }
                outcome
                    .merged
                    .push(self.board.line_position(direction, index, to));
            }

            next.write_line(direction, index, &slide.values);
        }

        if !outcome.moved {
            debug!("move {} changed nothing", direction.as_str());
            return outcome;
        }

        if self.config.undo_enabled {
            self.previous = Some(UndoSnapshot {
                board: std::mem::replace(&mut self.board, next),
                score: self.score,
                moves: self.moves,
                game_over: self.game_over,
            });
        } else {
            self.board = next;
        }

        self.score += outcome.points;
        self.moves += 1;
        if outcome.reached_target {
            self.target_reached = true;
            info!("reached {} after {} moves", self.config.win_value, self.moves);
        }

        outcome.spawned = self.spawn.spawn_into(&mut self.board, &mut self.rng);
        self.game_over = self.board.is_terminal(cap);

        debug!(
            "move {}: +{} (score {}, {} merges)",
            direction.as_str(),
            outcome.points,
            self.score,
            outcome.merged.len()
        );
        if self.game_over {
            info!("game over: score {}, highest tile {}", self.score, self.highest_tile());
        }

        outcome
    }

    /// Restore the state captured before the last applied move.
    ///
    /// Single level: a second call without an intervening move returns false.
    pub fn undo(&mut self) -> bool {
        let Some(prev) = self.previous.take() else {
            return false;
        };

        self.board = prev.board;
        self.score = prev.score;
        self.moves = prev.moves;
        self.game_over = prev.game_over;
        info!("undo: score back to {}", self.score);
        true
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft
            | GameAction::MoveRight
            | GameAction::MoveUp
            | GameAction::MoveDown => action
                .direction()
                .map_or(false, |direction| self.apply_move(direction).moved),
            GameAction::Undo => self.undo(),
            GameAction::Restart => {
                self.reset();
                true
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.size = self.board.size();
        out.cells.clear();
        out.cells.extend_from_slice(self.board.cells());
        out.score = self.score;
        out.moves = self.moves;
        out.highest_tile = self.board.highest_tile();
        out.game_over = self.game_over;
        out.reached_target = self.target_reached;
        out.can_undo = self.previous.is_some();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
