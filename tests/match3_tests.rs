//! Bubble Pop swaps and the pop/collapse/settle cascade.

use tui_parlor::core::match3::{find_matches, CascadePhase, Gem};
use tui_parlor::core::{BubblePop, Game, Match3Config, SimpleRng, Swap};
use tui_parlor::types::Pos;

/// Diagonal stripes: neighbours differ along both axes, so no runs.
fn stripes() -> Vec<Vec<Gem>> {
    (0..8)
        .map(|r| (0..8).map(|c| ((r + 2 * c) % 6) as Gem).collect())
        .collect()
}

#[test]
fn fresh_boards_start_without_runs() {
    for seed in 0..30 {
        let game = BubblePop::new_game(&Match3Config {
            seed,
            ..Default::default()
        })
        .unwrap();
        assert!(find_matches(game.grid()).is_empty(), "seed {seed}");
        assert_eq!(game.phase(), &CascadePhase::Idle);
        assert_eq!(game.score(), Some(0));
    }
}

#[test]
fn a_run_of_three_scores_thirty() {
    let mut grid = stripes();
    grid[0][0] = 5;
    grid[0][1] = 5;
    grid[0][2] = 5;
    let mut game = BubblePop::from_grid(grid, 6, SimpleRng::new(3)).unwrap();
    assert!(game.pending_transition().is_some());

    game.advance();
    let popping = game.popping().unwrap();
    assert_eq!(popping.count(), 3);
    assert!((0..3).all(|c| popping.contains(Pos::new(0, c))));
    assert_eq!(game.score(), Some(30));

    game.advance();
    assert_eq!(game.phase(), &CascadePhase::Settling);
    // Nothing sat above row 0, so the rest of the board is untouched.
    let untouched = stripes();
    for r in 1..8 {
        assert_eq!(game.grid()[r], untouched[r]);
    }
}

#[test]
fn swap_into_a_run_then_resolve() {
    let mut grid = stripes();
    // Row 0 reads 5 5 4 ...; row 1 column 2 holds the missing 5.
    grid[0][0] = 5;
    grid[0][1] = 5;
    let mut game = BubblePop::from_grid(grid, 6, SimpleRng::new(8)).unwrap();
    assert_eq!(game.grid()[1][2], 5);

    let swap = Swap {
        a: Pos::new(0, 2),
        b: Pos::new(1, 2),
    };
    assert!(game.apply(&swap));
    assert_eq!(game.moves(), 1);
    assert_eq!(game.score(), Some(30));
    assert!(
        !game.apply(&swap),
        "swaps are refused while the cascade runs"
    );

    game.resolve();
    assert_eq!(game.phase(), &CascadePhase::Idle);
    assert!(find_matches(game.grid()).is_empty());
    assert!(game.score().unwrap() >= 30);
    assert_eq!(game.score().unwrap() % 10, 0);
}

#[test]
fn swaps_without_a_run_are_refused() {
    let mut game = BubblePop::from_grid(stripes(), 6, SimpleRng::new(1)).unwrap();
    let before = game.grid().to_vec();
    assert!(!game.apply(&Swap {
        a: Pos::new(0, 0),
        b: Pos::new(0, 1),
    }));
    assert!(!game.apply(&Swap {
        a: Pos::new(0, 0),
        b: Pos::new(2, 2),
    }));
    assert_eq!(game.grid(), before.as_slice());
    assert_eq!(game.moves(), 0);
}

#[test]
fn hinted_swaps_always_pop() {
    for seed in 0..20 {
        let game = BubblePop::new_game(&Match3Config {
            seed,
            ..Default::default()
        })
        .unwrap();
        match game.hint() {
            Some(swap) => {
                let attempt = game.attempt_move(&swap);
                assert!(attempt.legal, "seed {seed}: {swap:?}");
                assert!(attempt.board.popping().is_some());
            }
            None => assert!(game.is_stuck()),
        }
    }
}
