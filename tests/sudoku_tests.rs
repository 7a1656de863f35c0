//! Sudoku generation, masking and conflict tracking.

use tui_parlor::core::sudoku::{cells_removed, find_conflicts, SIZE};
use tui_parlor::core::{Game, Sudoku, SudokuConfig, SudokuMove};
use tui_parlor::types::{Difficulty, Pos};

fn puzzle(seed: u32, difficulty: Difficulty) -> Sudoku {
    Sudoku::new_game(&SudokuConfig { seed, difficulty }).unwrap()
}

#[test]
fn solutions_are_complete_and_valid() {
    for seed in 0..40 {
        let game = puzzle(seed, Difficulty::Medium);
        let solution = game.solution();
        assert!(find_conflicts(solution).is_empty(), "seed {seed}");
        for row in solution {
            let mut sorted = *row;
            sorted.sort_unstable();
            assert_eq!(sorted, [1, 2, 3, 4, 5, 6, 7, 8, 9], "seed {seed}");
        }
    }
}

#[test]
fn puzzle_is_the_solution_with_holes() {
    for difficulty in Difficulty::ALL {
        for seed in 0..15 {
            let game = puzzle(seed, difficulty);
            let mut blanks = 0;
            for r in 0..SIZE {
                for c in 0..SIZE {
                    let value = game.grid()[r][c];
                    if value == 0 {
                        blanks += 1;
                    } else {
                        assert_eq!(value, game.solution()[r][c]);
                        assert!(game.is_given(Pos::new(r as u8, c as u8)));
                    }
                }
            }
            assert_eq!(blanks, cells_removed(difficulty), "{difficulty:?} seed {seed}");
            assert!(game.conflicts().is_empty());
        }
    }
}

#[test]
fn repeating_a_digit_in_a_row_flags_both_cells() {
    let mut game = puzzle(4, Difficulty::Easy);
    let (blank, given, digit) = (0..SIZE as u8)
        .find_map(|r| {
            let blank = (0..SIZE as u8).map(|c| Pos::new(r, c)).find(|&p| game.value(p) == 0)?;
            let given = (0..SIZE as u8).map(|c| Pos::new(r, c)).find(|&p| game.value(p) != 0)?;
            Some((blank, given, game.value(given)))
        })
        .unwrap();

    assert!(game.apply(&SudokuMove::Set { pos: blank, digit }));
    assert!(game.conflicts().contains(&blank));
    assert!(game.conflicts().contains(&given));
    assert!(!game.is_won());

    assert!(game.apply(&SudokuMove::Clear { pos: blank }));
    assert!(game.conflicts().is_empty());
}

#[test]
fn givens_cannot_be_changed() {
    let mut game = puzzle(8, Difficulty::Hard);
    let given = (0..SIZE as u8 * SIZE as u8)
        .map(|i| Pos::new(i / 9, i % 9))
        .find(|&p| game.is_given(p))
        .unwrap();
    let value = game.value(given);

    assert!(!game.apply(&SudokuMove::Set { pos: given, digit: value % 9 + 1 }));
    assert!(!game.apply(&SudokuMove::Clear { pos: given }));
    assert_eq!(game.value(given), value);
}

#[test]
fn revealing_every_blank_solves_the_puzzle() {
    let mut game = puzzle(21, Difficulty::Medium);
    let mut reveals = 0;
    while let Some(mv) = game.hint() {
        assert!(matches!(mv, SudokuMove::Reveal { .. }));
        assert!(game.apply(&mv));
        reveals += 1;
    }
    assert_eq!(reveals, cells_removed(Difficulty::Medium));
    assert!(game.is_won());
    assert!(game.empty_cells().is_empty());
}
