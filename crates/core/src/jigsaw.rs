//! Jigsaw: put every piece back in its home slot.
//!
//! Pieces are named by the slot they belong in (row-major). They start in a
//! shuffled tray; the board starts empty.

use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::game::{Game, GameConfig};
use crate::rng::SimpleRng;
use crate::types::{Difficulty, GameKind};

pub fn grid_size(difficulty: Difficulty) -> usize {
    match difficulty {
        Difficulty::Easy => 3,
        Difficulty::Medium => 4,
        Difficulty::Hard => 5,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JigsawConfig {
    pub seed: u32,
    pub difficulty: Difficulty,
}

impl GameConfig for JigsawConfig {
    fn seed(&self) -> u32 {
        self.seed
    }

    fn set_seed(&mut self, seed: u32) {
        self.seed = seed;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JigsawMove {
    /// Tray piece into a slot; any occupant goes to the end of the tray.
    Place { piece: usize, slot: usize },
    /// Board piece into another slot, swapping with any occupant.
    Shift { from: usize, to: usize },
    /// Board piece and tray piece trade places.
    Exchange { slot: usize, piece: usize },
}

#[derive(Debug, Clone, Serialize)]
pub struct Jigsaw {
    size: usize,
    slots: Vec<Option<usize>>,
    tray: Vec<usize>,
    moves: u32,
}

impl Jigsaw {
    pub fn from_tray(size: usize, tray: Vec<usize>) -> Self {
        Self {
            size,
            slots: vec![None; size * size],
            tray,
            moves: 0,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn slots(&self) -> &[Option<usize>] {
        &self.slots
    }

    pub fn tray(&self) -> &[usize] {
        &self.tray
    }

    /// Pieces sitting in their home slot.
    pub fn correct(&self) -> usize {
        self.slots
            .iter()
            .enumerate()
            .filter(|(slot, piece)| **piece == Some(*slot))
            .count()
    }

    fn tray_index(&self, piece: usize) -> Option<usize> {
        self.tray.iter().position(|&p| p == piece)
    }
}

impl Game for Jigsaw {
    type Config = JigsawConfig;
    type Move = JigsawMove;

    const KIND: GameKind = GameKind::Jigsaw;

    fn new_game(config: &JigsawConfig) -> Result<Self, GameError> {
        let size = grid_size(config.difficulty);
        let mut tray: Vec<usize> = (0..size * size).collect();
        SimpleRng::new(config.seed).shuffle(&mut tray);
        Ok(Self::from_tray(size, tray))
    }

    fn apply(&mut self, mv: &JigsawMove) -> bool {
        match *mv {
            JigsawMove::Place { piece, slot } => {
                let Some(at) = self.tray_index(piece) else {
                    return false;
                };
                if slot >= self.slots.len() {
                    return false;
                }
                self.tray.remove(at);
                if let Some(bumped) = self.slots[slot].replace(piece) {
                    self.tray.push(bumped);
                }
            }
            JigsawMove::Shift { from, to } => {
                if from == to || to >= self.slots.len() {
                    return false;
                }
                if self.slots.get(from).copied().flatten().is_none() {
                    return false;
                }
                self.slots.swap(from, to);
            }
            JigsawMove::Exchange { slot, piece } => {
                let Some(at) = self.tray_index(piece) else {
                    return false;
                };
                let Some(old) = self.slots.get(slot).copied().flatten() else {
                    return false;
                };
                self.slots[slot] = Some(piece);
                self.tray.remove(at);
                self.tray.push(old);
            }
        }
        self.moves += 1;
        true
    }

    /// Send the first tray piece home, else the first misplaced board piece.
    fn hint(&self) -> Option<JigsawMove> {
        if let Some(&piece) = self.tray.first() {
            return Some(JigsawMove::Place { piece, slot: piece });
        }
        self.slots
            .iter()
            .enumerate()
            .find_map(|(slot, piece)| match piece {
                Some(p) if *p != slot => Some(JigsawMove::Shift { from: slot, to: *p }),
                _ => None,
            })
    }

    fn is_won(&self) -> bool {
        self.correct() == self.slots.len()
    }

    fn is_stuck(&self) -> bool {
        false
    }

    fn moves(&self) -> u32 {
        self.moves
    }
}
