//! Shell configuration.
//!
//! Values come from the environment first, then command-line options
//! override them:
//!
//! | variable            | meaning                               |
//! |---------------------|---------------------------------------|
//! | `PARLOR_SEED`       | seed of the first board dealt         |
//! | `PARLOR_DIFFICULTY` | `easy`, `medium` or `hard`            |
//! | `PARLOR_DRAW`       | solitaire draw count, `1` or `3`      |
//! | `PARLOR_GAME`       | open this game instead of the menu    |

use std::env;

use log::warn;
use rand::Rng;

use crate::core::{
    BubblePop, DrawCount, FlowerGarden, Game, GardenConfig, Jigsaw, JigsawConfig, Mahjongg,
    MahjonggConfig, Match3Config, MemoryConfig, MemoryMatch, Solitaire, SolitaireConfig, Sudoku,
    SudokuConfig, WordSearch, WordSearchConfig,
};
use crate::types::{Difficulty, GameKind, Orientation};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShellConfig {
    /// `None` picks a random seed at startup.
    pub seed: Option<u32>,
    pub difficulty: Difficulty,
    pub draw: DrawCount,
    pub game: Option<GameKind>,
    /// Mahjongg layout variant; follows the terminal width.
    pub orientation: Orientation,
}

impl ShellConfig {
    /// Read the `PARLOR_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ShellConfig::from_env`] with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let seed = read("PARLOR_SEED").and_then(|s| match s.parse() {
            Ok(seed) => Some(seed),
            Err(_) => {
                warn!("ignoring PARLOR_SEED={s}: not a number");
                None
            }
        });
        let difficulty = read("PARLOR_DIFFICULTY")
            .and_then(|s| Difficulty::from_str(&s))
            .unwrap_or_default();
        let draw = read("PARLOR_DRAW")
            .and_then(|s| DrawCount::from_str(&s))
            .unwrap_or_default();
        let game = read("PARLOR_GAME").and_then(|s| GameKind::from_str(&s));

        Self {
            seed,
            difficulty,
            draw,
            game,
            orientation: Orientation::default(),
        }
    }

    /// The configured seed, or a random one.
    pub fn seed_or_random(&self) -> u32 {
        self.seed.unwrap_or_else(|| rand::rng().random())
    }

    pub fn solitaire(&self, seed: u32) -> SolitaireConfig {
        SolitaireConfig {
            seed,
            draw: self.draw,
        }
    }

    pub fn mahjongg(&self, seed: u32) -> MahjonggConfig {
        MahjonggConfig {
            seed,
            difficulty: self.difficulty,
            orientation: self.orientation,
            layout: None,
        }
    }

    pub fn sudoku(&self, seed: u32) -> SudokuConfig {
        SudokuConfig {
            seed,
            difficulty: self.difficulty,
        }
    }

    pub fn word_search(&self, seed: u32) -> WordSearchConfig {
        WordSearchConfig {
            seed,
            ..Default::default()
        }
    }

    pub fn memory(&self, seed: u32) -> MemoryConfig {
        MemoryConfig {
            seed,
            ..Default::default()
        }
    }

    pub fn jigsaw(&self, seed: u32) -> JigsawConfig {
        JigsawConfig {
            seed,
            difficulty: self.difficulty,
        }
    }

    pub fn bubble_pop(&self, seed: u32) -> Match3Config {
        Match3Config {
            seed,
            ..Default::default()
        }
    }

    pub fn garden(&self, seed: u32) -> GardenConfig {
        GardenConfig { seed }
    }

    /// Generate one board of `kind` as JSON.
    pub fn board_json(&self, kind: GameKind, seed: u32) -> anyhow::Result<serde_json::Value> {
        let value = match kind {
            GameKind::Solitaire => serde_json::to_value(Solitaire::new_game(&self.solitaire(seed))?)?,
            GameKind::Mahjongg => serde_json::to_value(Mahjongg::new_game(&self.mahjongg(seed))?)?,
            GameKind::Sudoku => serde_json::to_value(Sudoku::new_game(&self.sudoku(seed))?)?,
            GameKind::WordSearch => {
                serde_json::to_value(WordSearch::new_game(&self.word_search(seed))?)?
            }
            GameKind::MemoryMatch => serde_json::to_value(MemoryMatch::new_game(&self.memory(seed))?)?,
            GameKind::Jigsaw => serde_json::to_value(Jigsaw::new_game(&self.jigsaw(seed))?)?,
            GameKind::BubblePop => serde_json::to_value(BubblePop::new_game(&self.bubble_pop(seed))?)?,
            GameKind::FlowerGarden => serde_json::to_value(FlowerGarden::new_game(&self.garden(seed))?)?,
        };
        Ok(value)
    }
}
