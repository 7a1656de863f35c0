//! The contract every parlor game implements.
//!
//! A game is an owned board value. Moves mutate it through [`Game::apply`],
//! which either performs the whole move and returns `true` or leaves the board
//! untouched and returns `false`. [`Game::attempt_move`] is the pure form: it
//! never touches `self` and hands back the resulting board.
//!
//! Games with animated follow-up steps (match-3 cascades, memory pair
//! resolution) expose them as *transitions*: [`Game::pending_transition`]
//! reports the delay before the next step and [`Game::advance`] performs it.
//! A session layer schedules these on a timer; headless callers can simply
//! call [`Game::resolve`].

use std::fmt::Debug;

use crate::error::GameError;
use crate::types::GameKind;

/// Configuration for a game: every generator is seeded.
pub trait GameConfig: Clone + Debug {
    fn seed(&self) -> u32;
    fn set_seed(&mut self, seed: u32);
}

/// Result of [`Game::attempt_move`].
#[derive(Debug, Clone, PartialEq)]
pub struct Attempt<B> {
    pub board: B,
    pub legal: bool,
}

pub trait Game: Clone + Debug {
    type Config: GameConfig;
    type Move: Clone + Debug + PartialEq;

    const KIND: GameKind;

    /// A hint is applied on the spot instead of being shown.
    const HINT_REVEALS: bool = false;

    /// Asking for a hint on a board without moves deals a fresh one.
    const REFRESH_WHEN_NO_HINT: bool = false;

    /// Generate a fresh board.
    fn new_game(config: &Self::Config) -> Result<Self, GameError>;

    /// Apply a move in place. Illegal moves change nothing and return `false`.
    fn apply(&mut self, mv: &Self::Move) -> bool;

    /// Pure form of [`Game::apply`].
    fn attempt_move(&self, mv: &Self::Move) -> Attempt<Self> {
        let mut board = self.clone();
        if board.apply(mv) {
            Attempt { board, legal: true }
        } else {
            Attempt {
                board: self.clone(),
                legal: false,
            }
        }
    }

    /// A currently legal move worth suggesting, or `None`.
    ///
    /// Must not change the board: two calls without an intervening move
    /// return the same answer.
    fn hint(&self) -> Option<Self::Move>;

    fn is_won(&self) -> bool;

    fn is_stuck(&self) -> bool;

    /// Moves taken so far.
    fn moves(&self) -> u32 {
        0
    }

    /// Score, for games that keep one.
    fn score(&self) -> Option<u32> {
        None
    }

    /// Delay in milliseconds before the next deferred step, if one is pending.
    fn pending_transition(&self) -> Option<u32> {
        None
    }

    /// Perform the pending deferred step (no-op when nothing is pending).
    fn advance(&mut self) {}

    /// Run every pending step to completion without delays.
    fn resolve(&mut self) {
        while self.pending_transition().is_some() {
            self.advance();
        }
    }

    /// Real-time progress for games that evolve on their own.
    fn tick(&mut self, _elapsed_ms: u32) {}

    /// Recover from a stuck board (reshuffle, regenerate).
    ///
    /// Returns `true` when the board changed. Games without a recovery move
    /// keep the default.
    fn refresh(&mut self) -> bool {
        false
    }
}
