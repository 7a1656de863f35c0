//! Sudoku.
//!
//! Puzzles are derived from a fixed valid grid by validity-preserving
//! permutations (rows within a band, columns within a stack, whole bands,
//! whole stacks, then a relabelling of the digits) and masked down to the
//! difficulty's clue count.
//!
//! Entries are never refused for clashing: clashes are computed after every
//! change into a conflict set that the view highlights and that blocks the win.

use std::collections::BTreeSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::game::{Game, GameConfig};
use crate::rng::SimpleRng;
use crate::types::{Difficulty, GameKind, Pos};

pub const SIZE: usize = 9;
pub const BOX: usize = 3;

pub type Grid = [[u8; SIZE]; SIZE];

/// Cells blanked per difficulty.
pub fn cells_removed(difficulty: Difficulty) -> usize {
    match difficulty {
        Difficulty::Easy => 35,
        Difficulty::Medium => 46,
        Difficulty::Hard => 54,
    }
}

/// The seed grid every puzzle is permuted from: rows are shifted copies of
/// `123456789` (by 3 within a band, by 1 between bands).
fn base_value(row: usize, col: usize) -> u8 {
    ((row * BOX + row / BOX + col) % SIZE) as u8 + 1
}

/// Order of the nine lines after shuffling the three groups and the lines
/// inside each group.
fn shuffled_lines(rng: &mut SimpleRng) -> [usize; SIZE] {
    let mut groups = [0usize, 1, 2];
    let mut out = [0usize; SIZE];
    let mut inner: [[usize; BOX]; BOX] = [[0, 1, 2]; BOX];
    for lines in inner.iter_mut() {
        rng.shuffle(lines);
    }
    rng.shuffle(&mut groups);
    for (slot, &group) in groups.iter().enumerate() {
        for k in 0..BOX {
            out[slot * BOX + k] = group * BOX + inner[group][k];
        }
    }
    out
}

/// A complete valid grid.
pub fn generate_solution(rng: &mut SimpleRng) -> Grid {
    let rows = shuffled_lines(rng);
    let cols = shuffled_lines(rng);
    let mut digits: [u8; SIZE] = [1, 2, 3, 4, 5, 6, 7, 8, 9];
    rng.shuffle(&mut digits);

    let mut grid = [[0u8; SIZE]; SIZE];
    for r in 0..SIZE {
        for c in 0..SIZE {
            grid[r][c] = digits[(base_value(rows[r], cols[c]) - 1) as usize];
        }
    }
    grid
}

/// Every cell involved in a row, column or box duplicate.
pub fn find_conflicts(grid: &Grid) -> BTreeSet<Pos> {
    let mut out = BTreeSet::new();
    let mut mark = |cells: &[(usize, usize)]| {
        for (i, &(r1, c1)) in cells.iter().enumerate() {
            let v = grid[r1][c1];
            if v == 0 {
                continue;
            }
            for &(r2, c2) in &cells[i + 1..] {
                if grid[r2][c2] == v {
                    out.insert(Pos::new(r1 as u8, c1 as u8));
                    out.insert(Pos::new(r2 as u8, c2 as u8));
                }
            }
        }
    };

    for i in 0..SIZE {
        let row: Vec<(usize, usize)> = (0..SIZE).map(|c| (i, c)).collect();
        let col: Vec<(usize, usize)> = (0..SIZE).map(|r| (r, i)).collect();
        let (br, bc) = ((i / BOX) * BOX, (i % BOX) * BOX);
        let bx: Vec<(usize, usize)> = (0..SIZE).map(|k| (br + k / BOX, bc + k % BOX)).collect();
        mark(&row);
        mark(&col);
        mark(&bx);
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SudokuConfig {
    pub seed: u32,
    pub difficulty: Difficulty,
}

impl GameConfig for SudokuConfig {
    fn seed(&self) -> u32 {
        self.seed
    }

    fn set_seed(&mut self, seed: u32) {
        self.seed = seed;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SudokuMove {
    Set { pos: Pos, digit: u8 },
    Clear { pos: Pos },
    /// Fill a cell with its solution value and lock it.
    Reveal { pos: Pos },
}

#[derive(Debug, Clone, Serialize)]
pub struct Sudoku {
    grid: Grid,
    given: [[bool; SIZE]; SIZE],
    solution: Grid,
    conflicts: BTreeSet<Pos>,
    moves: u32,
    #[serde(skip)]
    rng: SimpleRng,
}

impl Sudoku {
    /// Build from a puzzle (0 = empty) and its solution. Non-empty puzzle
    /// cells become givens.
    pub fn from_puzzle(puzzle: Grid, solution: Grid, rng: SimpleRng) -> Self {
        let mut given = [[false; SIZE]; SIZE];
        for r in 0..SIZE {
            for c in 0..SIZE {
                given[r][c] = puzzle[r][c] != 0;
            }
        }
        Self {
            conflicts: find_conflicts(&puzzle),
            grid: puzzle,
            given,
            solution,
            moves: 0,
            rng,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn solution(&self) -> &Grid {
        &self.solution
    }

    pub fn value(&self, pos: Pos) -> u8 {
        self.grid[pos.row as usize][pos.col as usize]
    }

    pub fn is_given(&self, pos: Pos) -> bool {
        self.given[pos.row as usize][pos.col as usize]
    }

    pub fn conflicts(&self) -> &BTreeSet<Pos> {
        &self.conflicts
    }

    pub fn is_conflict(&self, pos: Pos) -> bool {
        self.conflicts.contains(&pos)
    }

    pub fn empty_cells(&self) -> Vec<Pos> {
        let mut out = Vec::new();
        for r in 0..SIZE {
            for c in 0..SIZE {
                if self.grid[r][c] == 0 {
                    out.push(Pos::new(r as u8, c as u8));
                }
            }
        }
        out
    }

    fn in_bounds(pos: Pos) -> bool {
        (pos.row as usize) < SIZE && (pos.col as usize) < SIZE
    }

    fn set_cell(&mut self, pos: Pos, value: u8) {
        self.grid[pos.row as usize][pos.col as usize] = value;
        self.conflicts = find_conflicts(&self.grid);
    }
}

impl Game for Sudoku {
    type Config = SudokuConfig;
    type Move = SudokuMove;

    const KIND: GameKind = GameKind::Sudoku;
    const HINT_REVEALS: bool = true;

    fn new_game(config: &SudokuConfig) -> Result<Self, GameError> {
        let mut rng = SimpleRng::new(config.seed);
        let solution = generate_solution(&mut rng);

        let mut cells: Vec<usize> = (0..SIZE * SIZE).collect();
        rng.shuffle(&mut cells);
        let removed = cells_removed(config.difficulty);
        let mut puzzle = solution;
        for &i in cells.iter().take(removed) {
            puzzle[i / SIZE][i % SIZE] = 0;
        }
        debug!(
            "sudoku: {:?} puzzle with {} clues",
            config.difficulty,
            SIZE * SIZE - removed
        );
        Ok(Self::from_puzzle(puzzle, solution, rng))
    }

    fn apply(&mut self, mv: &SudokuMove) -> bool {
        match *mv {
            SudokuMove::Set { pos, digit } => {
                if !Self::in_bounds(pos) || !(1..=9).contains(&digit) || self.is_given(pos) {
                    return false;
                }
                self.set_cell(pos, digit);
                self.moves += 1;
            }
            SudokuMove::Clear { pos } => {
                if !Self::in_bounds(pos) || self.is_given(pos) || self.value(pos) == 0 {
                    return false;
                }
                self.set_cell(pos, 0);
            }
            SudokuMove::Reveal { pos } => {
                if !Self::in_bounds(pos) || self.is_given(pos) {
                    return false;
                }
                let value = self.solution[pos.row as usize][pos.col as usize];
                self.given[pos.row as usize][pos.col as usize] = true;
                self.set_cell(pos, value);
                // Consume the draw the hint previewed.
                self.rng.next_u32();
            }
        }
        true
    }

    /// A uniformly random empty cell, revealed.
    fn hint(&self) -> Option<SudokuMove> {
        let empty = self.empty_cells();
        let mut preview = self.rng.clone();
        preview
            .choose(&empty)
            .map(|&pos| SudokuMove::Reveal { pos })
    }

    fn is_won(&self) -> bool {
        self.conflicts.is_empty() && self.grid == self.solution
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

    fn assert_valid(grid: &Grid) {
        assert!(find_conflicts(grid).is_empty());
        for row in grid {
            assert!(row.iter().all(|v| (1..=9).contains(v)));
        }
    }

    #[test]
    fn base_grid_is_valid() {
        let mut grid = [[0u8; SIZE]; SIZE];
        for r in 0..SIZE {
            for c in 0..SIZE {
                grid[r][c] = base_value(r, c);
            }
        }
        assert_eq!(grid[0], [1, 2, 3, 4, 5, 6, 7, 8, 9]);
        assert_eq!(grid[3], [2, 3, 4, 5, 6, 7, 8, 9, 1]);
        assert_valid(&grid);
    }

    #[test]
    fn generated_solutions_are_valid() {
        for seed in 0..25 {
            let mut rng = SimpleRng::new(seed);
            assert_valid(&generate_solution(&mut rng));
        }
    }

    #[test]
    fn puzzle_is_masked_solution() {
        for difficulty in Difficulty::ALL {
            let game = Sudoku::new_game(&SudokuConfig {
                seed: 11,
                difficulty,
            })
            .unwrap();
            let mut blanks = 0;
            for r in 0..SIZE {
                for c in 0..SIZE {
                    let pos = Pos::new(r as u8, c as u8);
                    if game.value(pos) == 0 {
                        blanks += 1;
                        assert!(!game.is_given(pos));
                    } else {
                        assert!(game.is_given(pos));
                        assert_eq!(game.value(pos), game.solution()[r][c]);
                    }
                }
            }
            assert_eq!(blanks, cells_removed(difficulty));
            assert!(game.conflicts().is_empty());
        }
    }

    #[test]
    fn row_duplicate_marks_both_cells_and_clearing_unmarks() {
        let solution = generate_solution(&mut SimpleRng::new(1));
        let mut game = Sudoku::from_puzzle([[0; SIZE]; SIZE], solution, SimpleRng::new(1));

        let a = Pos::new(0, 0);
        let b = Pos::new(0, 4);
        assert!(game.apply(&SudokuMove::Set { pos: a, digit: 5 }));
        assert!(game.conflicts().is_empty());
        assert!(game.apply(&SudokuMove::Set { pos: b, digit: 5 }));
        assert_eq!(
            game.conflicts().iter().copied().collect::<Vec<_>>(),
            vec![a, b]
        );

        assert!(game.apply(&SudokuMove::Clear { pos: b }));
        assert!(game.conflicts().is_empty());
        assert_eq!(game.moves(), 2);
    }

    #[test]
    fn givens_are_locked() {
        let game = Sudoku::new_game(&SudokuConfig::default()).unwrap();
        let given = (0..SIZE * SIZE)
            .map(|i| Pos::new((i / SIZE) as u8, (i % SIZE) as u8))
            .find(|&p| game.is_given(p))
            .unwrap();
        let attempt = game.attempt_move(&SudokuMove::Set {
            pos: given,
            digit: 1,
        });
        assert!(!attempt.legal);
        assert!(!game.clone().apply(&SudokuMove::Clear { pos: given }));
    }

    #[test]
    fn out_of_range_digits_are_rejected() {
        let mut game = Sudoku::new_game(&SudokuConfig::default()).unwrap();
        let pos = game.empty_cells()[0];
        assert!(!game.apply(&SudokuMove::Set { pos, digit: 0 }));
        assert!(!game.apply(&SudokuMove::Set { pos, digit: 10 }));
        assert!(!game.apply(&SudokuMove::Set {
            pos: Pos::new(9, 0),
            digit: 1
        }));
    }

    #[test]
    fn hint_is_idempotent_and_reveal_locks_the_cell() {
        let mut game = Sudoku::new_game(&SudokuConfig {
            seed: 5,
            difficulty: Difficulty::Hard,
        })
        .unwrap();
        let hint = game.hint();
        assert_eq!(hint, game.hint());

        let Some(SudokuMove::Reveal { pos }) = hint else {
            panic!("expected a reveal, got {hint:?}");
        };
        assert!(game.apply(&SudokuMove::Reveal { pos }));
        assert!(game.is_given(pos));
        assert_eq!(
            game.value(pos),
            game.solution()[pos.row as usize][pos.col as usize]
        );
        assert_eq!(game.empty_cells().len(), cells_removed(Difficulty::Hard) - 1);
    }

    #[test]
    fn filling_the_solution_wins() {
        let mut game = Sudoku::new_game(&SudokuConfig::default()).unwrap();
        assert!(!game.is_won());
        while let Some(mv) = game.hint() {
            assert!(game.apply(&mv));
        }
        assert!(game.is_won());
        assert!(!game.is_stuck());
    }

    #[test]
    fn full_but_wrong_grid_does_not_win() {
        let solution = generate_solution(&mut SimpleRng::new(2));
        let mut puzzle = solution;
        puzzle[0][0] = 0;
        let mut game = Sudoku::from_puzzle(puzzle, solution, SimpleRng::new(2));
        let wrong = solution[0][0] % 9 + 1;
        assert!(game.apply(&SudokuMove::Set {
            pos: Pos::new(0, 0),
            digit: wrong
        }));
        assert!(!game.is_won());
        assert!(!game.conflicts().is_empty());
    }
}
