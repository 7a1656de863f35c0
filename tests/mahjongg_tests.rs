//! Mahjongg layouts, the free-tile rule and stuck detection.

use std::collections::{HashMap, HashSet};

use tui_parlor::core::mahjongg::Slot;
use tui_parlor::core::{Game, Layout, Mahjongg, MahjonggConfig, MahjonggMove, SimpleRng};
use tui_parlor::types::{Difficulty, Orientation};

fn config(seed: u32, difficulty: Difficulty, orientation: Orientation) -> MahjonggConfig {
    MahjonggConfig {
        seed,
        difficulty,
        orientation,
        layout: None,
    }
}

#[test]
fn every_symbol_comes_in_pairs() {
    for difficulty in Difficulty::ALL {
        for orientation in [Orientation::Wide, Orientation::Tall] {
            for seed in 0..10 {
                let game = Mahjongg::new_game(&config(seed, difficulty, orientation)).unwrap();
                let mut counts: HashMap<u8, usize> = HashMap::new();
                for tile in game.tiles() {
                    *counts.entry(tile.type_id).or_default() += 1;
                }
                assert!(
                    counts.values().all(|&n| n % 2 == 0),
                    "{difficulty:?}/{orientation:?} seed {seed}: {counts:?}"
                );
            }
        }
    }
}

#[test]
fn no_two_tiles_share_a_position() {
    for difficulty in Difficulty::ALL {
        let game = Mahjongg::new_game(&config(1, difficulty, Orientation::Wide)).unwrap();
        let mut seen = HashSet::new();
        for tile in game.tiles() {
            assert!(seen.insert((tile.col, tile.row, tile.layer)), "{tile:?}");
        }
    }
}

#[test]
fn stuck_agrees_with_available_matches() {
    for seed in 0..20 {
        let mut game = Mahjongg::new_game(&config(seed, Difficulty::Easy, Orientation::Wide)).unwrap();
        // Clear pairs until the hint runs dry.
        while let Some(mv) = game.hint() {
            assert!(game.apply(&mv), "seed {seed}: hinted {mv:?} refused");
        }
        assert_eq!(game.is_stuck(), !game.is_won(), "seed {seed}");
        assert_eq!(game.is_stuck(), game.remaining() > 0 && !game.has_available_match());
    }
}

#[test]
fn diagonal_pairs_in_a_square_block() {
    let layout = Layout::new(vec![
        Slot::new(0, 0, 0),
        Slot::new(1, 0, 0),
        Slot::new(0, 1, 0),
        Slot::new(1, 1, 0),
    ])
    .unwrap();
    // A B / B A
    let mut game = Mahjongg::with_types(&layout, &[0, 1, 1, 0], SimpleRng::new(0));

    assert_eq!(game.free_tiles(), vec![0, 1, 2, 3]);
    assert!(!game.apply(&MahjonggMove { first: 0, second: 1 }));
    assert!(game.apply(&MahjonggMove { first: 0, second: 3 }));
    assert_eq!(game.remaining(), 2);
    assert_eq!(game.moves(), 1);
}

#[test]
fn covered_and_flanked_tiles_are_blocked() {
    let layout = Layout::new(vec![
        Slot::new(0, 0, 0),
        Slot::new(1, 0, 0),
        Slot::new(2, 0, 0),
        Slot::new(2, 0, 1),
    ])
    .unwrap();
    let game = Mahjongg::with_types(&layout, &[0, 0, 1, 1], SimpleRng::new(0));

    assert!(game.is_free(0));
    assert!(!game.is_free(1), "left and right neighbours");
    assert!(!game.is_free(2), "covered from above");
    assert!(game.is_free(3));
    assert!(game.is_stuck());
}

#[test]
fn shuffle_keeps_the_remaining_symbols() {
    let mut game = Mahjongg::new_game(&config(9, Difficulty::Medium, Orientation::Tall)).unwrap();
    if let Some(mv) = game.hint() {
        assert!(game.apply(&mv));
    }
    let symbols = |g: &Mahjongg| {
        let mut v: Vec<u8> = g.tiles().iter().filter(|t| !t.removed).map(|t| t.type_id).collect();
        v.sort_unstable();
        v
    };
    let before = symbols(&game);
    let remaining = game.remaining();

    assert!(game.refresh());
    assert_eq!(symbols(&game), before);
    assert_eq!(game.remaining(), remaining);
}
