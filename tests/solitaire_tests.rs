//! Solitaire deal and move rules through the facade.

use std::collections::HashSet;

use tui_parlor::core::solitaire::{DECK_SIZE, FOUNDATIONS, TABLEAU_COLUMNS};
use tui_parlor::core::{Game, Solitaire, SolitaireConfig, SolitaireMove};

fn deal(seed: u32) -> Solitaire {
    Solitaire::new_game(&SolitaireConfig {
        seed,
        ..Default::default()
    })
    .unwrap()
}

#[test]
fn deals_hold_every_card_once() {
    for seed in 0..50 {
        let game = deal(seed);
        let mut seen = HashSet::new();
        let piles = (0..TABLEAU_COLUMNS)
            .map(|c| game.column(c))
            .chain([game.stock(), game.waste()]);
        for pile in piles {
            for card in pile {
                assert!(seen.insert((card.rank, card.suit)), "seed {seed}: {card:?} twice");
            }
        }
        assert_eq!(seen.len(), DECK_SIZE, "seed {seed}");
    }
}

#[test]
fn columns_show_only_their_last_card() {
    for seed in 0..50 {
        let game = deal(seed);
        for c in 0..TABLEAU_COLUMNS {
            let column = game.column(c);
            assert_eq!(column.len(), c + 1);
            for (i, card) in column.iter().enumerate() {
                assert_eq!(card.face_up, i == c, "seed {seed} column {c} card {i}");
            }
        }
        for f in 0..FOUNDATIONS {
            assert!(game.foundation(f).is_empty());
        }
        assert_eq!(game.stock().len(), 24);
        assert!(game.waste().is_empty());
    }
}

#[test]
fn draining_the_stock_then_drawing_recycles_the_waste() {
    let mut game = deal(3);
    for _ in 0..24 {
        assert!(game.apply(&SolitaireMove::Draw));
    }
    assert!(game.stock().is_empty());
    assert_eq!(game.waste().len(), 24);

    assert!(game.apply(&SolitaireMove::Draw));
    assert_eq!(game.stock().len(), 24);
    assert!(game.waste().is_empty());
}

#[test]
fn attempt_move_leaves_the_original_alone() {
    let game = deal(11);
    let attempt = game.attempt_move(&SolitaireMove::Draw);
    assert!(attempt.legal);
    assert_eq!(attempt.board.stock().len(), 23);
    assert_eq!(game.stock().len(), 24);

    let refused = game.attempt_move(&SolitaireMove::WasteToTableau { to: 0 });
    assert!(!refused.legal);
    assert_eq!(refused.board.table(), game.table());
}

#[test]
fn hints_are_stable_and_legal() {
    for seed in 0..30 {
        let game = deal(seed);
        let first = game.hint();
        assert_eq!(first, game.hint(), "seed {seed}");
        if let Some(mv) = first {
            assert!(game.is_legal(&mv), "seed {seed}: {mv:?}");
        }
    }
}

#[test]
fn undo_walks_back_through_history() {
    let mut game = deal(5);
    let start = game.table().clone();
    assert!(!game.apply(&SolitaireMove::Undo));

    assert!(game.apply(&SolitaireMove::Draw));
    assert!(game.apply(&SolitaireMove::Draw));
    assert!(game.apply(&SolitaireMove::Undo));
    assert!(game.apply(&SolitaireMove::Undo));
    assert_eq!(game.table().stock, start.stock);
    assert_eq!(game.table().waste, start.waste);
    assert!(!game.can_undo());
}
