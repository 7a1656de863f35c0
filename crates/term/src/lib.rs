//! Terminal rendering for the puzzle parlor.
//!
//! Views draw into a plain [`FrameBuffer`]; the [`TerminalRenderer`] diffs
//! frames and flushes only what changed. Everything except the renderer is
//! pure and testable without a terminal.
//!
//! Each game gets a [`BoardView`] impl in its own module. The shared chrome
//! around the board lives in [`GameView`], the game picker in
//! [`DashboardView`].

pub mod dashboard;
pub mod fb;
pub mod game_view;
pub mod garden_view;
pub mod jigsaw_view;
pub mod mahjongg_view;
pub mod match3_view;
pub mod memory_view;
pub mod renderer;
pub mod solitaire_view;
pub mod sudoku_view;
pub mod word_search_view;

pub use tui_parlor_core as core;
pub use tui_parlor_engine as engine;
pub use tui_parlor_types as types;

pub use dashboard::{DashboardState, DashboardView};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, BoardView, Cursor, GameView, Marks, Viewport};
pub use renderer::{encode_frame, TerminalRenderer};
