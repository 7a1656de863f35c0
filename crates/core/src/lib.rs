//! Core game logic - pure, deterministic, and testable
//!
//! Every parlor game lives here as an owned board value implementing [`Game`].
//! Nothing in this crate touches the terminal, the clock or the filesystem:
//!
//! - **Deterministic**: the same seed always generates the same board
//! - **Pure moves**: [`Game::attempt_move`] returns a new board and never mutates its input
//! - **Headless**: deferred steps (cascades, pair reveals) run synchronously via [`Game::resolve`]
//!
//! # Module Structure
//!
//! - [`solitaire`]: Klondike deal, stacking rules, draw/recycle, undo
//! - [`mahjongg`]: layered tile layouts, free-tile rule, pair removal, shuffle recovery
//! - [`sudoku`]: solution generation, masking, conflict detection, reveal hints
//! - [`word_search`]: word placement and straight-line selection
//! - [`match3`]: Bubble Pop swaps and the pop/collapse/settle cascade
//! - [`memory`]: Memory Match pairs with timed resolution
//! - [`jigsaw`]: tray and board slots
//! - [`garden`]: Flower Garden plots that grow on the clock
//! - [`rng`]: seeded LCG shared by every generator
//!
//! # Example
//!
//! ```
//! use tui_parlor_core::{Game, Mahjongg, MahjonggConfig};
//!
//! let board = Mahjongg::new_game(&MahjonggConfig::default()).unwrap();
//! if let Some(mv) = board.hint() {
//!     let next = board.attempt_move(&mv);
//!     assert!(next.legal);
//!     assert_eq!(next.board.remaining(), board.remaining() - 2);
//! }
//! ```

pub mod error;
pub mod game;
pub mod garden;
pub mod jigsaw;
pub mod mahjongg;
pub mod match3;
pub mod memory;
pub mod rng;
pub mod solitaire;
pub mod sudoku;
pub mod word_search;

pub use tui_parlor_types as types;

// Re-export commonly used types for convenience
pub use error::GameError;
pub use game::{Attempt, Game, GameConfig};
pub use garden::{Flower, FlowerGarden, GardenConfig, GardenMove, Stage};
pub use jigsaw::{Jigsaw, JigsawConfig, JigsawMove};
pub use mahjongg::{Layout, Mahjongg, MahjonggConfig, MahjonggMove, Tile};
pub use match3::{BubblePop, Match3Config, Swap};
pub use memory::{Flip, MemoryConfig, MemoryMatch};
pub use rng::SimpleRng;
pub use solitaire::{Card, DrawCount, Solitaire, SolitaireConfig, SolitaireMove, Suit};
pub use sudoku::{Sudoku, SudokuConfig, SudokuMove};
pub use word_search::{Selection, WordSearch, WordSearchConfig};
