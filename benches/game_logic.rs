use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_parlor::core::{
    BubblePop, Game, Mahjongg, MahjonggConfig, Match3Config, Solitaire, SolitaireConfig, Sudoku,
    SudokuConfig, WordSearch, WordSearchConfig,
};
use tui_parlor::types::Difficulty;

fn bench_sudoku_generate(c: &mut Criterion) {
    let config = SudokuConfig {
        seed: 12345,
        difficulty: Difficulty::Hard,
    };
    c.bench_function("sudoku_new_game", |b| {
        b.iter(|| Sudoku::new_game(black_box(&config)))
    });
}

fn bench_mahjongg(c: &mut Criterion) {
    let config = MahjonggConfig {
        seed: 12345,
        difficulty: Difficulty::Hard,
        ..Default::default()
    };
    c.bench_function("mahjongg_new_game", |b| {
        b.iter(|| Mahjongg::new_game(black_box(&config)))
    });

    if let Ok(board) = Mahjongg::new_game(&config) {
        c.bench_function("mahjongg_hint", |b| b.iter(|| black_box(&board).hint()));
    }
}

fn bench_match3_resolve(c: &mut Criterion) {
    let config = Match3Config {
        seed: 12345,
        ..Default::default()
    };
    let Ok(board) = BubblePop::new_game(&config) else {
        return;
    };
    let Some(swap) = board.hint() else {
        return;
    };
    c.bench_function("bubble_pop_swap_and_resolve", |b| {
        b.iter(|| {
            let mut game = board.clone();
            game.apply(black_box(&swap));
            game.resolve();
            game
        })
    });
}

fn bench_solitaire_deal(c: &mut Criterion) {
    let config = SolitaireConfig {
        seed: 12345,
        ..Default::default()
    };
    c.bench_function("solitaire_deal", |b| {
        b.iter(|| Solitaire::deal(black_box(&config)))
    });
}

fn bench_word_search(c: &mut Criterion) {
    let config = WordSearchConfig {
        seed: 12345,
        ..Default::default()
    };
    c.bench_function("word_search_new_game", |b| {
        b.iter(|| WordSearch::new_game(black_box(&config)))
    });
}

criterion_group!(
    benches,
    bench_sudoku_generate,
    bench_mahjongg,
    bench_match3_resolve,
    bench_solitaire_deal,
    bench_word_search
);
criterion_main!(benches);
