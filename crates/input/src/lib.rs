//! Terminal input module (shell-facing).
//!
//! Maps `crossterm` key events into [`crate::types::ShellAction`]. The views
//! decide what each action means for their game; nothing here knows about
//! game rules.

pub mod map;

pub use tui_parlor_types as types;

pub use map::{handle_key_event, should_quit};
