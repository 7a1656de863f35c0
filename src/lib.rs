//! Puzzle parlor (workspace facade crate).
//!
//! Re-exports the workspace crates under short names and hosts the terminal
//! shell that ties them together: configuration, command-line options and the
//! dashboard/game screen loop.

pub mod cli;
pub mod config;
pub mod shell;

pub use tui_parlor_core as core;
pub use tui_parlor_engine as engine;
pub use tui_parlor_input as input;
pub use tui_parlor_term as term;
pub use tui_parlor_types as types;
