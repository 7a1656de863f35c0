//! Bubble Pop: swap neighbouring gems to line up three or more.
//!
//! A swap is accepted only if it creates a run. Accepted swaps start a
//! cascade that alternates two deferred steps until the board is at rest:
//!
//! 1. **pop**: every run of 3+ is marked and scores [`POINTS_PER_GEM`] per gem
//! 2. **collapse** (after [`CASCADE_POP_MS`]): marked gems vanish, survivors fall
//!    within their column and fresh random gems fill from the top
//! 3. **settle** (after [`CASCADE_SETTLE_MS`]): look for runs again and go back to 1
//!
//! Swaps are refused while a cascade is running.

use arrayvec::ArrayVec;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::game::{Game, GameConfig};
use crate::rng::SimpleRng;
use crate::types::{GameKind, Pos, CASCADE_POP_MS, CASCADE_SETTLE_MS, POINTS_PER_GEM};

pub const DEFAULT_ROWS: usize = 8;
pub const DEFAULT_COLS: usize = 8;

/// Gem names and glyphs, indexed by gem id.
pub const GEMS: [(&str, &str); 6] = [
    ("Pink", "🌸"),
    ("Star", "⭐"),
    ("Green", "🍀"),
    ("Blue", "💧"),
    ("Purple", "🔮"),
    ("Orange", "🍊"),
];

pub const MIN_RUN: usize = 3;

pub type Gem = u8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match3Config {
    pub seed: u32,
    pub rows: usize,
    pub cols: usize,
    pub gem_kinds: u8,
}

impl Default for Match3Config {
    fn default() -> Self {
        Self {
            seed: 1,
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            gem_kinds: GEMS.len() as u8,
        }
    }
}

impl GameConfig for Match3Config {
    fn seed(&self) -> u32 {
        self.seed
    }

    fn set_seed(&mut self, seed: u32) {
        self.seed = seed;
    }
}

/// Swap the gems at `a` and `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swap {
    pub a: Pos,
    pub b: Pos,
}

/// Cells that belong to a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Matches {
    marked: Vec<Vec<bool>>,
    count: usize,
}

impl Matches {
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.marked
            .get(pos.row as usize)
            .and_then(|row| row.get(pos.col as usize))
            .copied()
            .unwrap_or(false)
    }
}

/// Mark every horizontal and vertical run of [`MIN_RUN`] or more.
pub fn find_matches(grid: &[Vec<Gem>]) -> Matches {
    let rows = grid.len();
    let cols = grid.first().map_or(0, |r| r.len());
    let mut marked = vec![vec![false; cols]; rows];

    for r in 0..rows {
        let mut c = 0;
        while c < cols {
            let mut end = c + 1;
            while end < cols && grid[r][end] == grid[r][c] {
                end += 1;
            }
            if end - c >= MIN_RUN {
                for cell in &mut marked[r][c..end] {
                    *cell = true;
                }
            }
            c = end;
        }
    }

    for c in 0..cols {
        let mut r = 0;
        while r < rows {
            let mut end = r + 1;
            while end < rows && grid[end][c] == grid[r][c] {
                end += 1;
            }
            if end - r >= MIN_RUN {
                for row in &mut marked[r..end] {
                    row[c] = true;
                }
            }
            r = end;
        }
    }

    let count = marked.iter().flatten().filter(|m| **m).count();
    Matches { marked, count }
}

/// Where the running cascade is.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub enum CascadePhase {
    #[default]
    Idle,
    /// Runs are marked and scored; the next step removes them.
    Popping(Matches),
    /// The board was refilled; the next step looks for new runs.
    Settling,
}

#[derive(Debug, Clone, Serialize)]
pub struct BubblePop {
    grid: Vec<Vec<Gem>>,
    gem_kinds: u8,
    score: u32,
    moves: u32,
    phase: CascadePhase,
    #[serde(skip)]
    rng: SimpleRng,
}

impl BubblePop {
    /// Start from an explicit grid. Runs already on it are resolved by the
    /// first cascade step.
    ///
    /// The grid must be a rectangle whose sides fit the same bounds as a
    /// generated board.
    pub fn from_grid(
        grid: Vec<Vec<Gem>>,
        gem_kinds: u8,
        rng: SimpleRng,
    ) -> Result<Self, GameError> {
        let cols = grid.first().map_or(0, Vec::len);
        if let Some(ragged) = grid.iter().find(|row| row.len() != cols) {
            return Err(GameError::InvalidGridSize {
                rows: grid.len(),
                cols: ragged.len(),
            });
        }
        check_board(gem_kinds, grid.len(), cols)?;

        let phase = if find_matches(&grid).is_empty() {
            CascadePhase::Idle
        } else {
            CascadePhase::Settling
        };
        Ok(Self {
            grid,
            gem_kinds,
            score: 0,
            moves: 0,
            phase,
            rng,
        })
    }

    pub fn grid(&self) -> &[Vec<Gem>] {
        &self.grid
    }

    pub fn rows(&self) -> usize {
        self.grid.len()
    }

    pub fn cols(&self) -> usize {
        self.grid.first().map_or(0, |r| r.len())
    }

    pub fn gem(&self, pos: Pos) -> Option<Gem> {
        self.grid
            .get(pos.row as usize)
            .and_then(|row| row.get(pos.col as usize))
            .copied()
    }

    pub fn phase(&self) -> &CascadePhase {
        &self.phase
    }

    /// Cells currently marked for popping.
    pub fn popping(&self) -> Option<&Matches> {
        match &self.phase {
            CascadePhase::Popping(m) => Some(m),
            _ => None,
        }
    }

    fn in_bounds(&self, pos: Pos) -> bool {
        (pos.row as usize) < self.rows() && (pos.col as usize) < self.cols()
    }

    fn swap_cells(grid: &mut [Vec<Gem>], a: Pos, b: Pos) {
        let ga = grid[a.row as usize][a.col as usize];
        grid[a.row as usize][a.col as usize] = grid[b.row as usize][b.col as usize];
        grid[b.row as usize][b.col as usize] = ga;
    }

    /// Would swapping `a` and `b` create a run?
    pub fn swap_makes_match(&self, a: Pos, b: Pos) -> bool {
        if !self.in_bounds(a) || !self.in_bounds(b) || !a.is_adjacent(b) {
            return false;
        }
        let mut test = self.grid.clone();
        Self::swap_cells(&mut test, a, b);
        !find_matches(&test).is_empty()
    }

    /// Right and down neighbours of `pos` that exist.
    fn forward_neighbours(&self, pos: Pos) -> ArrayVec<Pos, 2> {
        let mut out = ArrayVec::new();
        if (pos.col as usize) + 1 < self.cols() {
            out.push(Pos::new(pos.row, pos.col + 1));
        }
        if (pos.row as usize) + 1 < self.rows() {
            out.push(Pos::new(pos.row + 1, pos.col));
        }
        out
    }

    fn random_gem(&mut self) -> Gem {
        self.rng.next_range(self.gem_kinds as u32) as Gem
    }

    /// Fill a fresh grid, re-rolling any gem that would complete a run to its
    /// left or above.
    fn fill(&mut self, rows: usize, cols: usize) {
        let mut grid: Vec<Vec<Gem>> = Vec::with_capacity(rows);
        for r in 0..rows {
            let mut row: Vec<Gem> = Vec::with_capacity(cols);
            for c in 0..cols {
                let gem = loop {
                    let gem = self.random_gem();
                    let left = c >= 2 && row[c - 1] == gem && row[c - 2] == gem;
                    let up = r >= 2 && grid[r - 1][c] == gem && grid[r - 2][c] == gem;
                    if !left && !up {
                        break gem;
                    }
                };
                row.push(gem);
            }
            grid.push(row);
        }
        self.grid = grid;
    }

    /// Mark and score the current runs. Returns `false` when there are none.
    fn pop(&mut self) -> bool {
        let matches = find_matches(&self.grid);
        if matches.is_empty() {
            self.phase = CascadePhase::Idle;
            return false;
        }
        self.score += matches.count() as u32 * POINTS_PER_GEM;
        debug!("bubble pop: {} gems popped, score {}", matches.count(), self.score);
        self.phase = CascadePhase::Popping(matches);
        true
    }

    /// Remove marked gems, let survivors fall and top up each column.
    fn collapse(&mut self, matches: &Matches) {
        let rows = self.rows();
        for c in 0..self.cols() {
            let survivors: Vec<Gem> = (0..rows)
                .filter(|&r| !matches.contains(Pos::new(r as u8, c as u8)))
                .map(|r| self.grid[r][c])
                .collect();
            let fresh = rows - survivors.len();
            for r in 0..fresh {
                self.grid[r][c] = self.random_gem();
            }
            for (i, gem) in survivors.into_iter().enumerate() {
                self.grid[fresh + i][c] = gem;
            }
        }
    }
}

fn check_board(gem_kinds: u8, rows: usize, cols: usize) -> Result<(), GameError> {
    if gem_kinds < 3 {
        return Err(GameError::TooFewGems(gem_kinds));
    }
    let fits = |n: usize| (MIN_RUN..=u8::MAX as usize).contains(&n);
    if !fits(rows) || !fits(cols) {
        return Err(GameError::InvalidGridSize { rows, cols });
    }
    Ok(())
}

impl Game for BubblePop {
    type Config = Match3Config;
    type Move = Swap;

    const KIND: GameKind = GameKind::BubblePop;
    const REFRESH_WHEN_NO_HINT: bool = true;

    fn new_game(config: &Match3Config) -> Result<Self, GameError> {
        check_board(config.gem_kinds, config.rows, config.cols)?;
        let mut game = Self {
            grid: Vec::new(),
            gem_kinds: config.gem_kinds,
            score: 0,
            moves: 0,
            phase: CascadePhase::Idle,
            rng: SimpleRng::new(config.seed),
        };
        game.fill(config.rows, config.cols);
        Ok(game)
    }

    fn apply(&mut self, swap: &Swap) -> bool {
        if self.phase != CascadePhase::Idle || !self.swap_makes_match(swap.a, swap.b) {
            return false;
        }
        Self::swap_cells(&mut self.grid, swap.a, swap.b);
        self.moves += 1;
        self.pop();
        true
    }

    /// First swap, scanning row-major and trying right then down.
    fn hint(&self) -> Option<Swap> {
        if self.phase != CascadePhase::Idle {
            return None;
        }
        for r in 0..self.rows() {
            for c in 0..self.cols() {
                let a = Pos::new(r as u8, c as u8);
                for b in self.forward_neighbours(a) {
                    if self.swap_makes_match(a, b) {
                        return Some(Swap { a, b });
                    }
                }
            }
        }
        None
    }

    fn is_won(&self) -> bool {
        false
    }

    fn is_stuck(&self) -> bool {
        self.phase == CascadePhase::Idle && self.hint().is_none()
    }

    fn moves(&self) -> u32 {
        self.moves
    }

    fn score(&self) -> Option<u32> {
        Some(self.score)
    }

    fn pending_transition(&self) -> Option<u32> {
        match self.phase {
            CascadePhase::Idle => None,
            CascadePhase::Popping(_) => Some(CASCADE_POP_MS),
            CascadePhase::Settling => Some(CASCADE_SETTLE_MS),
        }
    }

    fn advance(&mut self) {
        match std::mem::take(&mut self.phase) {
            CascadePhase::Idle => {}
            CascadePhase::Popping(matches) => {
                self.collapse(&matches);
                self.phase = CascadePhase::Settling;
            }
            CascadePhase::Settling => {
                self.pop();
            }
        }
    }

    /// Deal a fresh grid; score and moves carry over.
    fn refresh(&mut self) -> bool {
        if self.phase != CascadePhase::Idle {
            return false;
        }
        debug!("bubble pop: dealing a fresh grid");
        let (rows, cols) = (self.rows(), self.cols());
        self.fill(rows, cols);
        true
    }
}
