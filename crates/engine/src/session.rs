//! A live game: board, timers and the input lock.
//!
//! Deferred board steps reported by [`Game::pending_transition`] are queued on
//! the session's [`Scheduler`]. While one is queued the status is
//! [`SessionStatus::Resolving`] and every player move is refused. Hint
//! flashes and the rejected-move flash clear themselves on the same clock.

use log::{debug, info};

use tui_parlor_core::{Game, GameConfig, GameError, SimpleRng};
use tui_parlor_types::{
    SessionStatus, HINT_CLEAR_MS, NO_HINT_CLEAR_MS, SWAP_REJECT_MS,
};

use crate::scheduler::{Scheduler, TimerId};

/// What the hint area shows.
#[derive(Debug, Clone, PartialEq)]
pub enum HintState<M> {
    None,
    Showing(M),
    /// A hint was asked for and there is nothing to suggest.
    NoMoves,
}

impl<M> HintState<M> {
    pub fn is_none(&self) -> bool {
        matches!(self, HintState::None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    Advance,
    ClearHint,
    ClearRejected,
}

#[derive(Debug, Clone)]
pub struct Session<G: Game> {
    config: G::Config,
    game: G,
    status: SessionStatus,
    hint: HintState<G::Move>,
    rejected: Option<G::Move>,
    scheduler: Scheduler<Task>,
    hint_timer: Option<TimerId>,
    rejected_timer: Option<TimerId>,
    elapsed_ms: u64,
}

impl<G: Game> Session<G> {
    /// Generate a board from `config` and start playing it.
    pub fn new(config: G::Config) -> Result<Self, GameError> {
        let game = G::new_game(&config)?;
        Ok(Self::with_game(config, game))
    }

    /// Start a session on an existing board.
    pub fn with_game(config: G::Config, game: G) -> Self {
        let mut session = Self {
            config,
            game,
            status: SessionStatus::AwaitingInput,
            hint: HintState::None,
            rejected: None,
            scheduler: Scheduler::new(),
            hint_timer: None,
            rejected_timer: None,
            elapsed_ms: 0,
        };
        session.queue_transition();
        session
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn config(&self) -> &G::Config {
        &self.config
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn hint(&self) -> &HintState<G::Move> {
        &self.hint
    }

    /// The last refused move, while its flash is showing.
    pub fn rejected(&self) -> Option<&G::Move> {
        self.rejected.as_ref()
    }

    /// Play time; stops counting once the game is won.
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn is_won(&self) -> bool {
        self.game.is_won()
    }

    pub fn is_stuck(&self) -> bool {
        self.status.accepts_input() && self.game.is_stuck()
    }

    /// Transitions still queued.
    pub fn pending(&self) -> usize {
        self.scheduler.pending()
    }

    /// Play a move. Refused moves leave the board as it was.
    pub fn attempt(&mut self, mv: &G::Move) -> bool {
        if !self.status.accepts_input() {
            debug!("{}: move refused while {}", G::KIND.as_str(), self.status.as_str());
            return false;
        }
        if !self.game.apply(mv) {
            debug!("{}: illegal move {:?}", G::KIND.as_str(), mv);
            self.flash_rejected(mv.clone());
            return false;
        }

        self.clear_hint();
        self.queue_transition();
        if self.game.is_won() {
            info!("{}: won after {} moves", G::KIND.as_str(), self.game.moves());
        }
        true
    }

    /// Ask for a hint.
    ///
    /// Returns the suggested move. Games that reveal hints apply it at once;
    /// games that refresh on a dead board do so when there is nothing to
    /// suggest. Otherwise an empty answer shows the no-moves signal.
    pub fn request_hint(&mut self) -> Option<G::Move> {
        if !self.status.accepts_input() {
            return None;
        }
        self.clear_hint();

        match self.game.hint() {
            Some(mv) => {
                if G::HINT_REVEALS && !self.game.apply(&mv) {
                    return None;
                }
                self.show_hint(HintState::Showing(mv.clone()), HINT_CLEAR_MS);
                self.queue_transition();
                Some(mv)
            }
            None if G::REFRESH_WHEN_NO_HINT && self.game.refresh() => {
                debug!("{}: no moves left, fresh board dealt", G::KIND.as_str());
                self.queue_transition();
                None
            }
            None => {
                self.show_hint(HintState::NoMoves, NO_HINT_CLEAR_MS);
                None
            }
        }
    }

    /// Reshuffle or regenerate a stuck board.
    pub fn refresh(&mut self) -> bool {
        if !self.status.accepts_input() || !self.game.refresh() {
            return false;
        }
        self.clear_hint();
        self.queue_transition();
        true
    }

    /// Throw the board away and deal the next seed.
    pub fn restart(&mut self) -> Result<(), GameError> {
        let seed = SimpleRng::new(self.config.seed()).next_u32();
        let mut config = self.config.clone();
        config.set_seed(seed);
        let game = G::new_game(&config)?;

        self.teardown();
        debug!("{}: restarting with seed {seed}", G::KIND.as_str());
        *self = Self::with_game(config, game);
        Ok(())
    }

    /// Cancel everything queued and stop accepting moves.
    pub fn teardown(&mut self) {
        self.scheduler.cancel_all();
        self.hint_timer = None;
        self.rejected_timer = None;
        self.hint = HintState::None;
        self.rejected = None;
        self.status = SessionStatus::Idle;
    }

    /// Let `elapsed_ms` pass: run due transitions and the game's own clock.
    pub fn tick(&mut self, elapsed_ms: u32) {
        if self.status == SessionStatus::Idle {
            return;
        }
        if !self.game.is_won() {
            self.elapsed_ms += elapsed_ms as u64;
        }
        self.game.tick(elapsed_ms);

        let horizon = self.scheduler.now_ms() + elapsed_ms as u64;
        while let Some(task) = self.scheduler.pop_due(horizon) {
            self.run(task);
        }
        self.scheduler.advance_to(horizon);
    }

    fn run(&mut self, task: Task) {
        match task {
            Task::Advance => {
                self.game.advance();
                self.queue_transition();
            }
            Task::ClearHint => {
                self.hint_timer = None;
                self.hint = HintState::None;
            }
            Task::ClearRejected => {
                self.rejected_timer = None;
                self.rejected = None;
            }
        }
    }

    /// Queue the game's next deferred step, or unlock input when there is none.
    fn queue_transition(&mut self) {
        match self.game.pending_transition() {
            Some(delay) => {
                self.status = SessionStatus::Resolving;
                self.scheduler.schedule(delay, Task::Advance);
            }
            None => self.status = SessionStatus::AwaitingInput,
        }
    }

    fn show_hint(&mut self, hint: HintState<G::Move>, clear_after_ms: u32) {
        self.hint = hint;
        self.hint_timer = Some(self.scheduler.schedule(clear_after_ms, Task::ClearHint));
    }

    fn clear_hint(&mut self) {
        if let Some(id) = self.hint_timer.take() {
            self.scheduler.cancel(id);
        }
        self.hint = HintState::None;
    }

    fn flash_rejected(&mut self, mv: G::Move) {
        if let Some(id) = self.rejected_timer.take() {
            self.scheduler.cancel(id);
        }
        self.rejected = Some(mv);
        self.rejected_timer = Some(self.scheduler.schedule(SWAP_REJECT_MS, Task::ClearRejected));
    }
}
