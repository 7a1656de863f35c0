//! Construction-time errors.
//!
//! Illegal player moves are never errors (they are rejected with `false`).
//! These variants cover configurations that cannot produce a board at all.

/// A game could not be generated from its configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("layout has {0} positions; a tile layout needs an even count")]
    OddTileCount(usize),

    #[error("layout position (col {col}, row {row}, layer {layer}) appears more than once")]
    DuplicatePosition { col: u8, row: u8, layer: u8 },

    #[error("{pairs} pairs requested but only {available} symbols exist")]
    TooManyPairs { pairs: usize, available: usize },

    #[error("{0} gem kinds cannot fill a board without pre-made runs (need at least 3)")]
    TooFewGems(u8),

    #[error("grid of {rows}x{cols} is not supported")]
    InvalidGridSize { rows: usize, cols: usize },

    #[error("word bank is empty")]
    EmptyWordBank,
}
