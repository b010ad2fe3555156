//! Terminal 2048 runner (default binary).
//!
//! Interactive play uses crossterm for input and the framebuffer renderer from
//! `tui_2048::term`. The `replay` subcommand runs a move string headless and
//! prints the final state as JSON.

mod app;
mod replay;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use crossterm::event::{self, Event, KeyEventKind};
use env_logger::Env;
use log::info;

use tui_2048::core::{EngineConfig, GameState};
use tui_2048::input::{handle_key_event, should_quit};
use tui_2048::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_2048::types::{
    DEFAULT_BOARD_SIZE, DEFAULT_INITIAL_TILES, DEFAULT_SPAWN_HIGH_PROBABILITY,
    DEFAULT_SPAWN_HIGH_VALUE, DEFAULT_SPAWN_LOW_VALUE, DEFAULT_TRANSITION_MS, DEFAULT_WIN_VALUE,
    TICK_MS,
};

use crate::app::App;

#[derive(Debug, Parser)]
#[command(author, version, about = "Slide and merge tiles to reach 2048")]
struct Cli {
    #[command(flatten)]
    game: GameArgs,

    /// Write logs to this file (interactive play owns the terminal)
    #[arg(long, value_name = "FILE", global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply a move string headless and print the final state as JSON
    Replay {
        /// Moves as letters: L, R, U, D (Z undoes the last move)
        #[arg(long)]
        moves: String,
    },
}

#[derive(Debug, Args)]
struct GameArgs {
    /// RNG seed (random when omitted)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Board edge length
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE, global = true)]
    size: usize,

    /// Largest tile a merge may produce
    #[arg(long, value_name = "VALUE", global = true)]
    merge_cap: Option<u32>,

    /// Tile value that counts as a win
    #[arg(long, default_value_t = DEFAULT_WIN_VALUE, global = true)]
    win_value: u32,

    /// Tiles placed on a fresh board
    #[arg(long, default_value_t = DEFAULT_INITIAL_TILES, global = true)]
    initial_tiles: usize,

    /// Disable undo
    #[arg(long, global = true)]
    no_undo: bool,

    #[arg(long, default_value_t = DEFAULT_SPAWN_HIGH_VALUE, global = true)]
    spawn_high_value: u32,

    #[arg(long, default_value_t = DEFAULT_SPAWN_LOW_VALUE, global = true)]
    spawn_low_value: u32,

    /// Chance that a spawned tile takes the high-probability value
    #[arg(long, default_value_t = DEFAULT_SPAWN_HIGH_PROBABILITY, global = true)]
    spawn_high_probability: f64,

    /// Highlight duration after a move; input is ignored meanwhile
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_TRANSITION_MS, global = true)]
    transition_ms: u32,
}

impl GameArgs {
    fn config(&self) -> Result<EngineConfig> {
        let config = EngineConfig::default()
            .with_board_size(self.size)
            .with_merge_cap(self.merge_cap)
            .with_win_value(self.win_value)
            .with_initial_tiles(self.initial_tiles)
            .with_undo(!self.no_undo)
            .with_spawn(
                self.spawn_high_value,
                self.spawn_low_value,
                self.spawn_high_probability,
            );
        config.validate().context("invalid game options")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = match (&cli.command, &cli.log_file) {
        (Some(Command::Replay { .. }), _) => "warn",
        (None, Some(_)) => "info",
        (None, None) => "off",
    };
    init_logging(cli.log_file.as_deref(), default_filter)?;

    let config = cli.game.config()?;
    let seed = cli.game.seed.unwrap_or_else(rand::random);
    info!("seed {}", seed);
    let mut game = GameState::with_seed(config, seed)?;

    match cli.command {
        Some(Command::Replay { moves }) => {
            let actions = replay::parse_moves(&moves)?;
            let report = replay::replay(&mut game, seed, &actions);
            let json = serde_json::to_string_pretty(&report.to_json())
                .context("serialize replay report")?;
            println!("{}", json);
            Ok(())
        }
        None => {
            let mut term = TerminalRenderer::new();
            term.enter()?;

            let mut app = App::new(game, cli.game.transition_ms);
            let result = run(&mut term, &mut app);

            // Always try to restore terminal state.
            let _ = term.exit();
            result
        }
    }
}

fn init_logging(log_file: Option<&Path>, default_filter: &str) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or(default_filter));
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, app: &mut App) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut dirty = true;

    loop {
        // Render.
        if dirty {
            let viewport = TerminalRenderer::viewport().unwrap_or(Viewport::new(80, 24));
            let layout = view.render_into(app.snapshot(), app.overlay(), viewport, &mut fb);
            term.draw_swap(&mut fb, &layout)?;
            dirty = false;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        info!(
                            "quit with score {} ({} games recorded)",
                            app.game().score(),
                            app.history().len()
                        );
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        dirty |= app.handle_action(action);
                    }
                }
                Event::Resize(_, _) => {
                    term.invalidate();
                    dirty = true;
                }
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            dirty |= app.tick(TICK_MS);
        }
    }
}
