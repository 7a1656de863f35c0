//! Command-line options.
//!
//! Without options the binary opens the dashboard. `--generate` is a
//! developer mode that prints boards instead of playing them:
//!
//! ```text
//! $ tui-parlor --generate sudoku --count 2 --seed 7 --difficulty hard
//! [
//!   {
//!     "seed": 7,
//!     "board": { "grid": [[...]], ... }
//!   },
//!   ...
//! ]
//! ```

use std::io::Write;

use clap::Parser;
use log::{debug, LevelFilter};
use serde::Serialize;

use crate::config::ShellConfig;
use crate::core::{DrawCount, SimpleRng};
use crate::types::{Difficulty, GameKind};

/// Casual puzzle and card games in the terminal.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(about, version, long_about = None)]
pub struct Args {
    /// Print freshly generated boards of this game as JSON and exit
    #[arg(short, long, value_parser = parse_game)]
    pub generate: Option<GameKind>,

    /// Number of boards to generate
    #[arg(short, long, default_value_t = 1, requires = "generate")]
    pub count: usize,

    /// Seed of the first board
    #[arg(short, long)]
    pub seed: Option<u32>,

    /// Difficulty level: easy, medium or hard
    #[arg(short = 'f', long, value_parser = parse_difficulty)]
    pub difficulty: Option<Difficulty>,

    /// Solitaire cards turned per draw: 1 or 3
    #[arg(long, value_parser = parse_draw)]
    pub draw: Option<DrawCount>,

    /// Open this game instead of the dashboard
    #[arg(long, value_parser = parse_game, conflicts_with = "generate")]
    pub game: Option<GameKind>,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    pub debug: bool,
}

fn parse_game(s: &str) -> Result<GameKind, String> {
    GameKind::from_str(s).ok_or_else(|| {
        let names: Vec<&str> = GameKind::ALL.iter().map(GameKind::as_str).collect();
        format!("unknown game '{s}' (expected one of: {})", names.join(", "))
    })
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    Difficulty::from_str(s).ok_or_else(|| format!("unknown difficulty '{s}'"))
}

fn parse_draw(s: &str) -> Result<DrawCount, String> {
    DrawCount::from_str(s).ok_or_else(|| format!("draw count must be 1 or 3, not '{s}'"))
}

impl Args {
    /// Override `config` with the options that were given.
    pub fn apply(&self, config: &mut ShellConfig) {
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty;
        }
        if let Some(draw) = self.draw {
            config.draw = draw;
        }
        if let Some(game) = self.game {
            config.game = Some(game);
        }
    }
}

/// Start `env_logger`; `--debug` lowers the filter to debug.
///
/// Logs go to stderr, away from the game screen on stdout.
pub fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

#[derive(Serialize)]
struct GeneratedBoard {
    seed: u32,
    board: serde_json::Value,
}

/// Print `count` boards of `kind` as a pretty JSON array.
///
/// Seeds follow the same chain the shell uses for "new game".
pub fn generate(
    kind: GameKind,
    config: &ShellConfig,
    count: usize,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut seed = config.seed_or_random();
    let mut boards = Vec::with_capacity(count);
    for i in 0..count {
        debug!("generating {} #{i} with seed {seed}", kind.as_str());
        boards.push(GeneratedBoard {
            seed,
            board: config.board_json(kind, seed)?,
        });
        seed = SimpleRng::new(seed).next_u32();
    }
    serde_json::to_writer_pretty(&mut *out, &boards)?;
    writeln!(out)?;
    Ok(())
}
