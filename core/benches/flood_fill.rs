use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use sapper_core::{MineLayout, Minesweeper};

/// Worst case for the reveal worklist: one mine in the far corner, so the
/// first click opens almost the entire 100x100 board.
fn flood_fill(c: &mut Criterion) {
    let layout = MineLayout::from_coords((100, 100), &[(99, 99)]).unwrap();
    let game = Minesweeper::from_layout(&layout).unwrap();

    c.bench_function("flood_fill_100x100", |b| {
        b.iter(|| {
            let mut game = game.clone();
            black_box(game.reveal((0, 0)).unwrap())
        })
    });
}

criterion_group!(benches, flood_fill);
criterion_main!(benches);
