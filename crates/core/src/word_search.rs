//! Word search: find the hidden words in a letter grid.
//!
//! Words are laid horizontally (left to right) or vertically (top to bottom)
//! and may cross where their letters agree. A selection is the straight run of
//! cells between two picked cells; it finds a word when it spells one that is
//! still hidden.

use std::collections::HashSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::game::{Game, GameConfig};
use crate::rng::SimpleRng;
use crate::types::{GameKind, Pos};

pub const WORD_BANK: [&str; 29] = [
    "SCHNAUZER", "LOYAL", "FRIEND", "BARK", "PLAY", "WALK", "FETCH", "TREAT", "CUDDLE",
    "GENTLE", "SMART", "BRAVE", "HOME", "HAPPY", "TRUST", "CARE", "KIND", "CALM", "PEACE",
    "GUARD", "WATCH", "LOVE", "FAMILY", "PATIENT", "NOBLE", "GRACE", "DEVOTED", "PROTECT",
    "COMPANION",
];

/// Placement tries per word before it is dropped.
pub const PLACEMENT_ATTEMPTS: usize = 50;

const FILL_LETTERS: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSearchConfig {
    pub seed: u32,
    pub size: usize,
    pub word_count: usize,
    pub bank: Vec<String>,
}

impl Default for WordSearchConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            size: 8,
            word_count: 6,
            bank: WORD_BANK.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl GameConfig for WordSearchConfig {
    fn seed(&self) -> u32 {
        self.seed
    }

    fn set_seed(&mut self, seed: u32) {
        self.seed = seed;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedWord {
    pub word: String,
    /// Cells in reading order.
    pub cells: Vec<Pos>,
}

/// Pick the run of cells from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub start: Pos,
    pub end: Pos,
}

#[derive(Debug, Clone, Serialize)]
pub struct WordSearch {
    grid: Vec<Vec<char>>,
    words: Vec<PlacedWord>,
    found: Vec<String>,
    moves: u32,
}

impl WordSearch {
    /// Build from a finished grid and its word paths.
    pub fn from_parts(grid: Vec<Vec<char>>, words: Vec<PlacedWord>) -> Self {
        Self {
            grid,
            words,
            found: Vec::new(),
            moves: 0,
        }
    }

    pub fn size(&self) -> usize {
        self.grid.len()
    }

    pub fn grid(&self) -> &[Vec<char>] {
        &self.grid
    }

    pub fn letter(&self, pos: Pos) -> Option<char> {
        self.grid
            .get(pos.row as usize)
            .and_then(|row| row.get(pos.col as usize))
            .copied()
    }

    pub fn words(&self) -> &[PlacedWord] {
        &self.words
    }

    pub fn found(&self) -> &[String] {
        &self.found
    }

    pub fn is_found(&self, word: &str) -> bool {
        self.found.iter().any(|w| w == word)
    }

    /// Is `pos` part of a word that has been found?
    pub fn in_found_word(&self, pos: Pos) -> bool {
        self.words
            .iter()
            .any(|w| self.is_found(&w.word) && w.cells.contains(&pos))
    }

    /// Letters along the selection, or `None` when it is not a straight
    /// line of at least two cells inside the grid.
    pub fn read(&self, selection: &Selection) -> Option<String> {
        let cells = selection.start.line_to(selection.end)?;
        if cells.len() < 2 {
            return None;
        }
        cells.iter().map(|&p| self.letter(p)).collect()
    }

    /// Unfound placed word spelled by the selection.
    fn match_selection(&self, selection: &Selection) -> Option<&PlacedWord> {
        let spelled = self.read(selection)?;
        self.words
            .iter()
            .find(|w| w.word == spelled && !self.is_found(&w.word))
    }
}

/// Try to write `word` into `grid` at a random spot.
fn place_word(grid: &mut [Vec<Option<char>>], word: &str, rng: &mut SimpleRng) -> Option<Vec<Pos>> {
    let size = grid.len();
    let letters: Vec<char> = word.chars().collect();
    for _ in 0..PLACEMENT_ATTEMPTS {
        let horizontal = rng.next_bool();
        let row = rng.next_index(size);
        let col = rng.next_index(size);
        let end = if horizontal { col } else { row } + letters.len();
        if end > size {
            continue;
        }

        let cells: Vec<(usize, usize)> = (0..letters.len())
            .map(|i| if horizontal { (row, col + i) } else { (row + i, col) })
            .collect();
        let fits = cells
            .iter()
            .zip(&letters)
            .all(|(&(r, c), &ch)| grid[r][c].map_or(true, |existing| existing == ch));
        if !fits {
            continue;
        }

        for (&(r, c), &ch) in cells.iter().zip(&letters) {
            grid[r][c] = Some(ch);
        }
        return Some(cells.iter().map(|&(r, c)| Pos::new(r as u8, c as u8)).collect());
    }
    None
}

impl Game for WordSearch {
    type Config = WordSearchConfig;
    type Move = Selection;

    const KIND: GameKind = GameKind::WordSearch;

    fn new_game(config: &WordSearchConfig) -> Result<Self, GameError> {
        if config.size < 2 || config.size > u8::MAX as usize {
            return Err(GameError::InvalidGridSize {
                rows: config.size,
                cols: config.size,
            });
        }
        if config.bank.is_empty() {
            return Err(GameError::EmptyWordBank);
        }

        let mut rng = SimpleRng::new(config.seed);
        // A word placed twice could only ever be found once.
        let mut seen = HashSet::new();
        let mut bank: Vec<String> = config
            .bank
            .iter()
            .map(|w| w.to_uppercase())
            .filter(|w| seen.insert(w.clone()))
            .collect();
        rng.shuffle(&mut bank);

        let mut cells: Vec<Vec<Option<char>>> = vec![vec![None; config.size]; config.size];
        let mut words = Vec::new();
        for word in bank.into_iter().take(config.word_count) {
            match place_word(&mut cells, &word, &mut rng) {
                Some(path) => words.push(PlacedWord { word, cells: path }),
                None => debug!("word search: could not place {word}, skipping"),
            }
        }

        let mut random_letter = || FILL_LETTERS[rng.next_index(FILL_LETTERS.len())] as char;
        let grid: Vec<Vec<char>> = cells
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| cell.unwrap_or_else(&mut random_letter))
                    .collect::<Vec<char>>()
            })
            .collect();

        Ok(Self::from_parts(grid, words))
    }

    fn apply(&mut self, selection: &Selection) -> bool {
        let Some(word) = self.match_selection(selection).map(|w| w.word.clone()) else {
            return false;
        };
        self.found.push(word);
        self.moves += 1;
        true
    }

    /// Endpoints of the first word still hidden.
    fn hint(&self) -> Option<Selection> {
        self.words
            .iter()
            .find(|w| !self.is_found(&w.word))
            .and_then(|w| {
                Some(Selection {
                    start: *w.cells.first()?,
                    end: *w.cells.last()?,
                })
            })
    }

    fn is_won(&self) -> bool {
        self.found.len() == self.words.len()
    }

    fn is_stuck(&self) -> bool {
        false
    }

    fn moves(&self) -> u32 {
        self.moves
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> WordSearch {
        let rows = ["CATX", "XXXD", "XXXO", "XXXG"];
        let grid = rows.iter().map(|r| r.chars().collect()).collect();
        WordSearch::from_parts(
            grid,
            vec![
                PlacedWord {
                    word: "CAT".into(),
                    cells: vec![Pos::new(0, 0), Pos::new(0, 1), Pos::new(0, 2)],
                },
                PlacedWord {
                    word: "DOG".into(),
                    cells: vec![Pos::new(1, 3), Pos::new(2, 3), Pos::new(3, 3)],
                },
            ],
        )
    }

    #[test]
    fn placed_paths_spell_their_words() {
        for seed in 1..30 {
            let game = WordSearch::new_game(&WordSearchConfig {
                seed,
                ..Default::default()
            })
            .unwrap();
            assert!(!game.words().is_empty());
            for w in game.words() {
                let spelled: String = w.cells.iter().filter_map(|&p| game.letter(p)).collect();
                assert_eq!(spelled, w.word);
            }
        }
    }

    #[test]
    fn crossing_words_agree_on_shared_cells() {
        for seed in 1..30 {
            let game = WordSearch::new_game(&WordSearchConfig {
                seed,
                ..Default::default()
            })
            .unwrap();
            let mut claimed = std::collections::HashMap::new();
            for w in game.words() {
                for (pos, ch) in w.cells.iter().zip(w.word.chars()) {
                    if let Some(prev) = claimed.insert(*pos, ch) {
                        assert_eq!(prev, ch, "conflict at {pos:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn grid_is_fully_lettered() {
        let game = WordSearch::new_game(&WordSearchConfig::default()).unwrap();
        assert_eq!(game.size(), 8);
        assert!(game
            .grid()
            .iter()
            .flatten()
            .all(|c| c.is_ascii_uppercase()));
    }

    #[test]
    fn selection_in_either_direction_finds_word() {
        let mut game = tiny();
        assert!(game.apply(&Selection {
            start: Pos::new(0, 2),
            end: Pos::new(0, 0)
        }));
        assert!(game.is_found("CAT"));
        // Already found.
        assert!(!game.apply(&Selection {
            start: Pos::new(0, 0),
            end: Pos::new(0, 2)
        }));
        assert!(game.in_found_word(Pos::new(0, 1)));
        assert!(!game.in_found_word(Pos::new(2, 3)));
    }

    #[test]
    fn bad_selections_are_rejected() {
        let game = tiny();
        let single = Selection {
            start: Pos::new(0, 0),
            end: Pos::new(0, 0),
        };
        let diagonal = Selection {
            start: Pos::new(0, 0),
            end: Pos::new(2, 2),
        };
        let wrong = Selection {
            start: Pos::new(0, 0),
            end: Pos::new(0, 3),
        };
        for s in [single, diagonal, wrong] {
            assert!(!game.attempt_move(&s).legal);
        }
    }

    #[test]
    fn hint_walks_through_hidden_words_until_won() {
        let mut game = tiny();
        assert_eq!(game.hint(), game.hint());
        while let Some(sel) = game.hint() {
            assert!(game.apply(&sel));
        }
        assert!(game.is_won());
        assert_eq!(game.moves(), 2);
    }

    #[test]
    fn oversized_words_are_skipped() {
        let game = WordSearch::new_game(&WordSearchConfig {
            seed: 3,
            size: 4,
            word_count: 2,
            bank: vec!["COMPANION".into(), "SCHNAUZER".into()],
        })
        .unwrap();
        assert!(game.words().is_empty());
        assert!(game.is_won());
    }

    #[test]
    fn invalid_configs_fail() {
        let empty = WordSearchConfig {
            bank: Vec::new(),
            ..Default::default()
        };
        assert_eq!(WordSearch::new_game(&empty).unwrap_err(), GameError::EmptyWordBank);

        let tiny = WordSearchConfig {
            size: 1,
            ..Default::default()
        };
        assert!(matches!(
            WordSearch::new_game(&tiny),
            Err(GameError::InvalidGridSize { .. })
        ));
    }
}
