//! Core types module - shared data structures and constants
//!
//! This module defines the plain data types used throughout the parlor: board
//! coordinates, difficulty and orientation knobs, the catalogue of games, the
//! session status machine and every timing constant. Nothing here knows about
//! rules, rendering or I/O.
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `CASCADE_POP_MS` | 550 | Matched gems stay visible before they drop |
//! | `CASCADE_SETTLE_MS` | 350 | Refilled board settles before re-checking |
//! | `SWAP_REJECT_MS` | 280 | An illegal swap preview is shown, then reverted |
//! | `MEMORY_MATCH_MS` | 600 | A matching pair is confirmed |
//! | `MEMORY_MISMATCH_MS` | 1200 | A mismatching pair flips back |
//! | `HINT_CLEAR_MS` | 3000 | A shown hint disappears |
//! | `NO_HINT_CLEAR_MS` | 2000 | The "no moves" signal disappears |
//!
//! # Examples
//!
//! ```
//! use tui_parlor_types::{Difficulty, GameKind, Orientation, Pos};
//!
//! assert_eq!(Difficulty::from_str("HARD"), Some(Difficulty::Hard));
//! assert_eq!(Orientation::for_width(800), Orientation::Wide);
//! assert_eq!(GameKind::from_str("mahjongg"), Some(GameKind::Mahjongg));
//! assert!(Pos::new(2, 3).is_adjacent(Pos::new(2, 4)));
//! ```

use serde::{Deserialize, Serialize};

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Delay between marking a run and collapsing it (550ms)
pub const CASCADE_POP_MS: u32 = 550;

/// Delay between a collapse and the next match check (350ms)
pub const CASCADE_SETTLE_MS: u32 = 350;

/// How long an illegal swap preview stays on screen (280ms)
pub const SWAP_REJECT_MS: u32 = 280;

/// Delay before a matched memory pair is recorded (600ms)
pub const MEMORY_MATCH_MS: u32 = 600;

/// Delay before a mismatched memory pair flips back (1200ms)
pub const MEMORY_MISMATCH_MS: u32 = 1200;

/// Lifetime of a displayed hint (3000ms)
pub const HINT_CLEAR_MS: u32 = 3000;

/// Lifetime of the "no moves available" signal (2000ms)
pub const NO_HINT_CLEAR_MS: u32 = 2000;

/// Growth time per garden stage: seed→sprout, sprout→bud, bud→bloom
pub const GARDEN_STAGE_MS: [u32; 3] = [4000, 5000, 6000];

/// Time shaved off a growing plot by watering it
pub const GARDEN_WATER_BOOST_MS: u32 = 2000;

/// A watered plot never grows sooner than this
pub const GARDEN_WATER_FLOOR_MS: u32 = 300;

/// Terminal/window width at which layouts switch to the wide variant
pub const WIDE_LAYOUT_MIN_WIDTH: u16 = 640;

/// Points awarded per cleared gem
pub const POINTS_PER_GEM: u32 = 10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(CASCADE_POP_MS, 550);
        assert_eq!(CASCADE_SETTLE_MS, 350);
        assert_eq!(SWAP_REJECT_MS, 280);
        assert_eq!(MEMORY_MATCH_MS, 600);
        assert_eq!(MEMORY_MISMATCH_MS, 1200);
        assert_eq!(HINT_CLEAR_MS, 3000);
        assert_eq!(NO_HINT_CLEAR_MS, 2000);
        assert_eq!(GARDEN_STAGE_MS, [4000, 5000, 6000]);
    }

    #[test]
    fn pos_adjacency_is_orthogonal_only() {
        let p = Pos::new(3, 3);
        assert!(p.is_adjacent(Pos::new(2, 3)));
        assert!(p.is_adjacent(Pos::new(3, 4)));
        assert!(!p.is_adjacent(Pos::new(4, 4)));
        assert!(!p.is_adjacent(p));
        assert!(!p.is_adjacent(Pos::new(3, 5)));
    }

    #[test]
    fn straight_line_between_cells() {
        let row: Vec<Pos> = Pos::new(1, 5).line_to(Pos::new(1, 2)).unwrap();
        assert_eq!(
            row,
            vec![Pos::new(1, 2), Pos::new(1, 3), Pos::new(1, 4), Pos::new(1, 5)]
        );

        let col = Pos::new(0, 0).line_to(Pos::new(2, 0)).unwrap();
        assert_eq!(col, vec![Pos::new(0, 0), Pos::new(1, 0), Pos::new(2, 0)]);

        assert!(Pos::new(0, 0).line_to(Pos::new(1, 1)).is_none());
    }

    #[test]
    fn game_kind_round_trips_names() {
        for kind in GameKind::ALL {
            assert_eq!(GameKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(GameKind::from_str("chess"), None);
    }

    #[test]
    fn shell_action_names() {
        assert_eq!(ShellAction::from_str("newGame"), Some(ShellAction::NewGame));
        assert_eq!(ShellAction::from_str("HINT"), Some(ShellAction::Hint));
        assert_eq!(ShellAction::from_str("digit7"), Some(ShellAction::Digit(7)));
        assert_eq!(ShellAction::from_str("digit0"), None);
        assert_eq!(ShellAction::from_str("hardDrop"), None);
    }

    #[test]
    fn orientation_follows_width_threshold() {
        assert_eq!(Orientation::for_width(639), Orientation::Tall);
        assert_eq!(Orientation::for_width(640), Orientation::Wide);
    }
}

/// A cell coordinate on a rectangular board (row-major).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// True when `other` shares an edge with `self` (manhattan distance 1).
    pub fn is_adjacent(&self, other: Pos) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }

    /// Cells on the straight horizontal or vertical segment between `self` and
    /// `other`, inclusive, in ascending order.
    ///
    /// Returns `None` when the two cells share neither a row nor a column.
    pub fn line_to(&self, other: Pos) -> Option<Vec<Pos>> {
        if self.row == other.row {
            let (lo, hi) = (self.col.min(other.col), self.col.max(other.col));
            Some((lo..=hi).map(|c| Pos::new(self.row, c)).collect())
        } else if self.col == other.col {
            let (lo, hi) = (self.row.min(other.row), self.row.max(other.row));
            Some((lo..=hi).map(|r| Pos::new(r, self.col)).collect())
        } else {
            None
        }
    }
}

/// Difficulty level shared by the generated puzzles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Parse difficulty from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_parlor_types::Difficulty;
    ///
    /// assert_eq!(Difficulty::from_str("easy"), Some(Difficulty::Easy));
    /// assert_eq!(Difficulty::from_str("Medium"), Some(Difficulty::Medium));
    /// assert_eq!(Difficulty::from_str("insane"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Cycle easy → medium → hard → easy.
    pub fn next(&self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }
}

/// Layout orientation for boards that come in wide and tall variants.
///
/// Choosing the orientation is the caller's job (usually from the terminal
/// width); generators take it as plain configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Wide,
    Tall,
}

impl Orientation {
    /// Pick the orientation for a display of the given width.
    pub fn for_width(width: u16) -> Self {
        if width >= WIDE_LAYOUT_MIN_WIDTH {
            Orientation::Wide
        } else {
            Orientation::Tall
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "wide" | "w" => Some(Orientation::Wide),
            "tall" | "t" => Some(Orientation::Tall),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Wide => "wide",
            Orientation::Tall => "tall",
        }
    }
}

/// Every game on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameKind {
    Solitaire,
    Mahjongg,
    Sudoku,
    WordSearch,
    MemoryMatch,
    Jigsaw,
    BubblePop,
    FlowerGarden,
}

impl GameKind {
    /// Dashboard order.
    pub const ALL: [GameKind; 8] = [
        GameKind::Solitaire,
        GameKind::Mahjongg,
        GameKind::Sudoku,
        GameKind::WordSearch,
        GameKind::MemoryMatch,
        GameKind::Jigsaw,
        GameKind::BubblePop,
        GameKind::FlowerGarden,
    ];

    /// Parse a game name (case-insensitive, `-`/`_` separators optional).
    pub fn from_str(s: &str) -> Option<Self> {
        let key: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "solitaire" => Some(GameKind::Solitaire),
            "mahjongg" | "mahjong" => Some(GameKind::Mahjongg),
            "sudoku" => Some(GameKind::Sudoku),
            "wordsearch" => Some(GameKind::WordSearch),
            "memorymatch" | "memory" => Some(GameKind::MemoryMatch),
            "jigsaw" => Some(GameKind::Jigsaw),
            "bubblepop" | "match3" => Some(GameKind::BubblePop),
            "flowergarden" | "garden" => Some(GameKind::FlowerGarden),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::Solitaire => "solitaire",
            GameKind::Mahjongg => "mahjongg",
            GameKind::Sudoku => "sudoku",
            GameKind::WordSearch => "word-search",
            GameKind::MemoryMatch => "memory-match",
            GameKind::Jigsaw => "jigsaw",
            GameKind::BubblePop => "bubble-pop",
            GameKind::FlowerGarden => "flower-garden",
        }
    }

    /// Human-readable title for menus.
    pub fn title(&self) -> &'static str {
        match self {
            GameKind::Solitaire => "Solitaire",
            GameKind::Mahjongg => "Mahjongg",
            GameKind::Sudoku => "Sudoku",
            GameKind::WordSearch => "Word Search",
            GameKind::MemoryMatch => "Memory Match",
            GameKind::Jigsaw => "Jigsaw Puzzle",
            GameKind::BubblePop => "Bubble Pop",
            GameKind::FlowerGarden => "Flower Garden",
        }
    }
}

/// Lifecycle of a game session.
///
/// - **Idle**: no live board (not started or torn down)
/// - **AwaitingInput**: the board is at rest and accepts moves
/// - **Resolving**: a deferred transition is pending; moves are rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    #[default]
    Idle,
    Resolving,
    AwaitingInput,
}

impl SessionStatus {
    pub fn accepts_input(&self) -> bool {
        matches!(self, SessionStatus::AwaitingInput)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Idle => "idle",
            SessionStatus::Resolving => "resolving",
            SessionStatus::AwaitingInput => "awaitingInput",
        }
    }
}

/// Player intents, independent of the key that produced them.
///
/// Each view decides what an action means for its game (e.g. `Select`
/// flips a memory card but picks up a solitaire run).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShellAction {
    /// Move the cursor
    Up,
    Down,
    Left,
    Right,
    /// Pick up, drop or activate whatever is under the cursor
    Select,
    /// Drop the current selection without acting
    Cancel,
    /// Show (or, for Sudoku, apply) a hint
    Hint,
    /// Solitaire undo
    Undo,
    /// Solitaire draw from the stock
    Draw,
    /// Reshuffle a stuck board
    Shuffle,
    /// Deal a new board with the next seed
    NewGame,
    /// Cycle difficulty and deal
    Difficulty,
    /// Leave the game for the dashboard
    Back,
    /// Sudoku digit entry
    Digit(u8),
    /// Sudoku clear cell
    Erase,
}

impl ShellAction {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" => Some(ShellAction::Up),
            "down" => Some(ShellAction::Down),
            "left" => Some(ShellAction::Left),
            "right" => Some(ShellAction::Right),
            "select" => Some(ShellAction::Select),
            "cancel" => Some(ShellAction::Cancel),
            "hint" => Some(ShellAction::Hint),
            "undo" => Some(ShellAction::Undo),
            "draw" => Some(ShellAction::Draw),
            "shuffle" => Some(ShellAction::Shuffle),
            "newgame" => Some(ShellAction::NewGame),
            "difficulty" => Some(ShellAction::Difficulty),
            "back" => Some(ShellAction::Back),
            "erase" => Some(ShellAction::Erase),
            other => other
                .strip_prefix("digit")
                .and_then(|d| d.parse::<u8>().ok())
                .filter(|d| (1..=9).contains(d))
                .map(ShellAction::Digit),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShellAction::Up => "up",
            ShellAction::Down => "down",
            ShellAction::Left => "left",
            ShellAction::Right => "right",
            ShellAction::Select => "select",
            ShellAction::Cancel => "cancel",
            ShellAction::Hint => "hint",
            ShellAction::Undo => "undo",
            ShellAction::Draw => "draw",
            ShellAction::Shuffle => "shuffle",
            ShellAction::NewGame => "newGame",
            ShellAction::Difficulty => "difficulty",
            ShellAction::Back => "back",
            ShellAction::Digit(_) => "digit",
            ShellAction::Erase => "erase",
        }
    }
}
