use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use sapper_core::{BoardSize, MinefieldGenerator, SafeZoneGenerator};

fn gen_mines(c: &mut Criterion) {
    c.bench_function("generate_expert", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed = seed.wrapping_add(1);
            black_box(SafeZoneGenerator::new(seed, (15, 8)).generate(&BoardSize::EXPERT))
        })
    });

    c.bench_function("generate_dense_100x100", |b| {
        let size = BoardSize::new(100, 100, 2_500);
        let mut seed = 0u64;
        b.iter(|| {
            seed = seed.wrapping_add(1);
            black_box(SafeZoneGenerator::new(seed, (50, 50)).generate(&size))
        })
    });
}

criterion_group!(benches, gen_mines);
criterion_main!(benches);
