//! Memory Match: flip two cards at a time looking for pairs.
//!
//! Turning the second card of a turn locks the table. The pair resolves as a
//! deferred step: a match stays face up after [`MEMORY_MATCH_MS`], a mismatch
//! turns back face down after [`MEMORY_MISMATCH_MS`].

use arrayvec::ArrayVec;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::game::{Game, GameConfig};
use crate::rng::SimpleRng;
use crate::types::{GameKind, MEMORY_MATCH_MS, MEMORY_MISMATCH_MS};

/// Card faces, indexed by symbol id.
pub const SYMBOLS: [(&str, &str); 8] = [
    ("Heart", "♥"),
    ("Light", "💡"),
    ("Star", "★"),
    ("Moon", "☾"),
    ("Leaf", "🍃"),
    ("Bell", "🔔"),
    ("Sun", "☀"),
    ("Drop", "💧"),
];

pub const DEFAULT_PAIRS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryConfig {
    pub seed: u32,
    pub pairs: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            pairs: DEFAULT_PAIRS,
        }
    }
}

impl GameConfig for MemoryConfig {
    fn seed(&self) -> u32 {
        self.seed
    }

    fn set_seed(&mut self, seed: u32) {
        self.seed = seed;
    }
}

/// Turn the card at `index` face up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flip {
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemoryCard {
    pub symbol: u8,
    pub face_up: bool,
    pub matched: bool,
}

impl MemoryCard {
    pub fn glyph(&self) -> &'static str {
        SYMBOLS[self.symbol as usize % SYMBOLS.len()].1
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MemoryMatch {
    cards: Vec<MemoryCard>,
    flipped: ArrayVec<usize, 2>,
    matched_pairs: usize,
    moves: u32,
}

impl MemoryMatch {
    /// Lay out cards in the given symbol order, all face down.
    pub fn from_symbols(symbols: &[u8]) -> Self {
        Self {
            cards: symbols
                .iter()
                .map(|&symbol| MemoryCard {
                    symbol,
                    face_up: false,
                    matched: false,
                })
                .collect(),
            flipped: ArrayVec::new(),
            matched_pairs: 0,
            moves: 0,
        }
    }

    pub fn cards(&self) -> &[MemoryCard] {
        &self.cards
    }

    pub fn pairs(&self) -> usize {
        self.cards.len() / 2
    }

    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    /// Indices turned this turn, in flip order.
    pub fn flipped(&self) -> &[usize] {
        &self.flipped
    }

    /// A full pair is waiting to be resolved.
    pub fn is_locked(&self) -> bool {
        self.flipped.is_full()
    }

    fn flipped_pair_matches(&self) -> bool {
        match self.flipped.as_slice() {
            [a, b] => self.cards[*a].symbol == self.cards[*b].symbol,
            _ => false,
        }
    }
}

impl Game for MemoryMatch {
    type Config = MemoryConfig;
    type Move = Flip;

    const KIND: GameKind = GameKind::MemoryMatch;

    fn new_game(config: &MemoryConfig) -> Result<Self, GameError> {
        if config.pairs > SYMBOLS.len() {
            return Err(GameError::TooManyPairs {
                pairs: config.pairs,
                available: SYMBOLS.len(),
            });
        }
        let mut symbols: Vec<u8> = (0..config.pairs as u8).flat_map(|s| [s, s]).collect();
        SimpleRng::new(config.seed).shuffle(&mut symbols);
        Ok(Self::from_symbols(&symbols))
    }

    fn apply(&mut self, flip: &Flip) -> bool {
        if self.is_locked() {
            return false;
        }
        let Some(card) = self.cards.get_mut(flip.index) else {
            return false;
        };
        if card.face_up || card.matched {
            return false;
        }
        card.face_up = true;
        self.flipped.push(flip.index);
        if self.is_locked() {
            self.moves += 1;
        }
        true
    }

    fn hint(&self) -> Option<Flip> {
        None
    }

    fn is_won(&self) -> bool {
        self.matched_pairs == self.pairs()
    }

    fn is_stuck(&self) -> bool {
        false
    }

    fn moves(&self) -> u32 {
        self.moves
    }

    fn pending_transition(&self) -> Option<u32> {
        if !self.is_locked() {
            None
        } else if self.flipped_pair_matches() {
            Some(MEMORY_MATCH_MS)
        } else {
            Some(MEMORY_MISMATCH_MS)
        }
    }

    fn advance(&mut self) {
        if !self.is_locked() {
            return;
        }
        let matched = self.flipped_pair_matches();
        for index in self.flipped.drain(..) {
            let card = &mut self.cards[index];
            if matched {
                card.matched = true;
            } else {
                card.face_up = false;
            }
        }
        if matched {
            self.matched_pairs += 1;
            debug!("memory: pair {}/{} matched", self.matched_pairs, self.cards.len() / 2);
        }
    }
}
