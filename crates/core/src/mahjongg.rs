//! Mahjongg solitaire: clear a stacked layout by removing free pairs.
//!
//! A tile is *free* when nothing rests on top of it and at least one of its
//! horizontal neighbours on the same layer is gone. Two free tiles of the same
//! symbol can be removed together. Tiles never move; a shuffle only changes
//! which symbol sits where.
//!
//! Layouts are plain position lists. Presets are keyed by difficulty and
//! orientation; which orientation suits the display is decided by the caller.

use std::collections::{HashMap, HashSet};
use std::ops::Range;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::game::{Game, GameConfig};
use crate::rng::SimpleRng;
use crate::types::{Difficulty, GameKind, Orientation};

/// Tile symbols. Easy layouts use the first 18, larger layouts all 36.
pub const TILE_SYMBOLS: [&str; 36] = [
    "🌸", "🌺", "🌻", "🌹", "🌷", "🌼", "🍀", "🍁", "🍂", "🌿", "🌊", "🌙", "☀", "⭐", "🌈",
    "⚡", "❤", "💛", "💚", "💙", "💜", "🎵", "💎", "🎯", "🍎", "🍊", "🍋", "🍇", "🍓", "🍒",
    "🦋", "🐝", "🦊", "🐢", "🐬", "🐦",
];

/// Attempts a shuffle makes to land on a board with a free pair.
pub const SHUFFLE_ATTEMPTS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub col: u8,
    pub row: u8,
    pub layer: u8,
}

impl Slot {
    pub const fn new(col: u8, row: u8, layer: u8) -> Self {
        Self { col, row, layer }
    }
}

/// A validated set of tile positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layout {
    slots: Vec<Slot>,
}

impl Layout {
    /// Validate a position list: even length, no repeated position, and no
    /// more pairs than there are symbols.
    pub fn new(slots: Vec<Slot>) -> Result<Self, GameError> {
        if slots.len() % 2 != 0 {
            return Err(GameError::OddTileCount(slots.len()));
        }
        if slots.len() / 2 > TILE_SYMBOLS.len() {
            return Err(GameError::TooManyPairs {
                pairs: slots.len() / 2,
                available: TILE_SYMBOLS.len(),
            });
        }
        let mut seen = HashSet::with_capacity(slots.len());
        for s in &slots {
            if !seen.insert(*s) {
                return Err(GameError::DuplicatePosition {
                    col: s.col,
                    row: s.row,
                    layer: s.layer,
                });
            }
        }
        Ok(Self { slots })
    }

    /// Built-in layout for a difficulty and orientation.
    pub fn preset(difficulty: Difficulty, orientation: Orientation) -> Self {
        let mut s = Vec::with_capacity(72);
        match (difficulty, orientation) {
            (Difficulty::Easy, Orientation::Wide) => {
                block(&mut s, 0, 0..3, 0..6);
                block(&mut s, 1, 0..3, 1..5);
                block(&mut s, 2, 0..3, 2..4);
            }
            (Difficulty::Easy, Orientation::Tall) => {
                block(&mut s, 0, 0..5, 0..4);
                block(&mut s, 1, 0..5, 1..3);
                block(&mut s, 2, 1..4, 1..3);
            }
            (Difficulty::Medium, Orientation::Wide) => {
                block(&mut s, 0, 0..5, 0..8);
                block(&mut s, 1, 0..4, 1..7);
                block(&mut s, 2, 1..3, 2..6);
            }
            (Difficulty::Medium, Orientation::Tall) => {
                block(&mut s, 0, 0..7, 0..5);
                block(&mut s, 1, 0..7, 1..4);
                block(&mut s, 2, 2..6, 1..5);
            }
            (Difficulty::Hard, Orientation::Wide) => {
                block(&mut s, 0, 0..4, 0..8);
                block(&mut s, 1, 0..4, 1..7);
                block(&mut s, 2, 1..3, 2..6);
                block(&mut s, 3, 1..3, 2..6);
            }
            (Difficulty::Hard, Orientation::Tall) => {
                block(&mut s, 0, 0..7, 0..5);
                block(&mut s, 1, 1..7, 1..4);
                block(&mut s, 2, 1..6, 1..4);
                block(&mut s, 3, 2..6, 2..3);
            }
        }
        Self { slots: s }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Columns and rows spanned by the layout.
    pub fn extent(&self) -> (u8, u8) {
        let cols = self.slots.iter().map(|s| s.col + 1).max().unwrap_or(0);
        let rows = self.slots.iter().map(|s| s.row + 1).max().unwrap_or(0);
        (cols, rows)
    }
}

/// Push a rectangular block of positions on one layer, row by row.
fn block(out: &mut Vec<Slot>, layer: u8, rows: Range<u8>, cols: Range<u8>) {
    for row in rows {
        for col in cols.clone() {
            out.push(Slot::new(col, row, layer));
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tile {
    pub id: usize,
    pub col: u8,
    pub row: u8,
    pub layer: u8,
    pub type_id: u8,
    pub removed: bool,
}

impl Tile {
    pub fn symbol(&self) -> &'static str {
        TILE_SYMBOLS
            .get(self.type_id as usize)
            .copied()
            .unwrap_or("?")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MahjonggConfig {
    pub seed: u32,
    pub difficulty: Difficulty,
    pub orientation: Orientation,
    /// Overrides the preset when set.
    pub layout: Option<Layout>,
}

impl GameConfig for MahjonggConfig {
    fn seed(&self) -> u32 {
        self.seed
    }

    fn set_seed(&mut self, seed: u32) {
        self.seed = seed;
    }
}

/// Remove the two tiles with these ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MahjonggMove {
    pub first: usize,
    pub second: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Mahjongg {
    tiles: Vec<Tile>,
    #[serde(skip)]
    occupancy: HashMap<Slot, usize>,
    #[serde(skip)]
    top_layer: u8,
    moves: u32,
    #[serde(skip)]
    rng: SimpleRng,
}

impl Mahjongg {
    /// Lay out `layout` with the given symbol per position.
    ///
    /// `types[i]` is the symbol of the tile at `layout.slots()[i]`.
    pub fn with_types(layout: &Layout, types: &[u8], rng: SimpleRng) -> Self {
        let tiles: Vec<Tile> = layout
            .slots()
            .iter()
            .zip(types.iter())
            .enumerate()
            .map(|(id, (slot, &type_id))| Tile {
                id,
                col: slot.col,
                row: slot.row,
                layer: slot.layer,
                type_id,
                removed: false,
            })
            .collect();
        let occupancy = tiles
            .iter()
            .map(|t| (Slot::new(t.col, t.row, t.layer), t.id))
            .collect();
        let top_layer = tiles.iter().map(|t| t.layer).max().unwrap_or(0);
        Self {
            tiles,
            occupancy,
            top_layer,
            moves: 0,
            rng,
        }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, id: usize) -> Option<&Tile> {
        self.tiles.get(id)
    }

    pub fn remaining(&self) -> usize {
        self.tiles.iter().filter(|t| !t.removed).count()
    }

    /// Columns and rows spanned by the tiles, removed ones included.
    pub fn extent(&self) -> (u8, u8) {
        let cols = self.tiles.iter().map(|t| t.col + 1).max().unwrap_or(0);
        let rows = self.tiles.iter().map(|t| t.row + 1).max().unwrap_or(0);
        (cols, rows)
    }

    /// Highest live tile stacked at `(col, row)`.
    pub fn top_tile(&self, col: u8, row: u8) -> Option<usize> {
        (0..=self.top_layer)
            .rev()
            .find_map(|layer| self.live_at(col as i16, row, layer))
    }

    /// Id of the live tile at a position, if any.
    fn live_at(&self, col: i16, row: u8, layer: u8) -> Option<usize> {
        let col = u8::try_from(col).ok()?;
        let id = *self.occupancy.get(&Slot::new(col, row, layer))?;
        (!self.tiles[id].removed).then_some(id)
    }

    pub fn is_free(&self, id: usize) -> bool {
        let Some(tile) = self.tiles.get(id) else {
            return false;
        };
        if tile.removed {
            return false;
        }
        let covered = (tile.layer + 1..=self.top_layer)
            .any(|layer| self.live_at(tile.col as i16, tile.row, layer).is_some());
        if covered {
            return false;
        }
        let left = self.live_at(tile.col as i16 - 1, tile.row, tile.layer).is_some();
        let right = self.live_at(tile.col as i16 + 1, tile.row, tile.layer).is_some();
        !(left && right)
    }

    /// Free tiles in id order.
    pub fn free_tiles(&self) -> Vec<usize> {
        (0..self.tiles.len()).filter(|&id| self.is_free(id)).collect()
    }

    /// First free pair sharing a symbol (lowest ids first).
    fn first_free_pair(&self) -> Option<MahjonggMove> {
        let free = self.free_tiles();
        for (i, &a) in free.iter().enumerate() {
            for &b in &free[i + 1..] {
                if self.tiles[a].type_id == self.tiles[b].type_id {
                    return Some(MahjonggMove {
                        first: a,
                        second: b,
                    });
                }
            }
        }
        None
    }

    pub fn has_available_match(&self) -> bool {
        self.first_free_pair().is_some()
    }

    /// Redistribute the symbols of the remaining tiles.
    ///
    /// Retries up to [`SHUFFLE_ATTEMPTS`] times until a free pair exists and
    /// keeps the last attempt either way. Needs at least two tiles left.
    pub fn shuffle_remaining(&mut self) -> bool {
        let live: Vec<usize> = self
            .tiles
            .iter()
            .filter(|t| !t.removed)
            .map(|t| t.id)
            .collect();
        if live.len() < 2 {
            return false;
        }

        let mut types: Vec<u8> = live.iter().map(|&id| self.tiles[id].type_id).collect();
        for attempt in 1..=SHUFFLE_ATTEMPTS {
            self.rng.shuffle(&mut types);
            for (&id, &type_id) in live.iter().zip(types.iter()) {
                self.tiles[id].type_id = type_id;
            }
            if self.has_available_match() {
                debug!("mahjongg: shuffle found a free pair after {attempt} attempt(s)");
                return true;
            }
        }
        debug!("mahjongg: shuffle gave up after {SHUFFLE_ATTEMPTS} attempts");
        true
    }
}

impl Game for Mahjongg {
    type Config = MahjonggConfig;
    type Move = MahjonggMove;

    const KIND: GameKind = GameKind::Mahjongg;

    fn new_game(config: &MahjonggConfig) -> Result<Self, GameError> {
        let layout = match &config.layout {
            Some(layout) => layout.clone(),
            None => Layout::preset(config.difficulty, config.orientation),
        };

        let pairs = (layout.len() / 2) as u8;
        let mut types: Vec<u8> = (0..pairs).chain(0..pairs).collect();
        let mut rng = SimpleRng::new(config.seed);
        rng.shuffle(&mut types);

        debug!(
            "mahjongg: {} tiles ({:?}/{:?})",
            layout.len(),
            config.difficulty,
            config.orientation
        );
        Ok(Self::with_types(&layout, &types, rng))
    }

    fn apply(&mut self, mv: &MahjonggMove) -> bool {
        let MahjonggMove { first, second } = *mv;
        if first == second || !self.is_free(first) || !self.is_free(second) {
            return false;
        }
        if self.tiles[first].type_id != self.tiles[second].type_id {
            return false;
        }
        self.tiles[first].removed = true;
        self.tiles[second].removed = true;
        self.moves += 1;
        true
    }

    fn hint(&self) -> Option<MahjonggMove> {
        self.first_free_pair()
    }

    fn is_won(&self) -> bool {
        self.tiles.iter().all(|t| t.removed)
    }

    fn is_stuck(&self) -> bool {
        self.remaining() > 0 && !self.has_available_match()
    }

    fn moves(&self) -> u32 {
        self.moves
    }

    fn refresh(&mut self) -> bool {
        self.shuffle_remaining()
    }
}
