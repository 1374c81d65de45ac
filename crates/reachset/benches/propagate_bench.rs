//! Criterion benchmarks for one-step propagation through the zero-state polygon.
//! Focus sizes: base-polygon vertex counts in {4 (rectangle), 6 (hexagon)}.
//! Results: by default under target/criterion; to store under data/bench, run:
//!   CARGO_TARGET_DIR=data/bench cargo bench -p reachset --bench propagate_bench

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use reachset::poly2::Poly2;
use reachset::propagate::propagate;
use reachset::zero_state::create_zero_state_polygon;

fn bench_propagate(c: &mut Criterion) {
    let mut group = c.benchmark_group("propagate");
    let z = create_zero_state_polygon(0.1, -5.0, 3.0).unwrap();

    group.bench_function(BenchmarkId::new("rectangle_base", 4), |b| {
        b.iter_batched(
            || Poly2::from_rect(0.0, 0.0, 20.0, 15.0),
            |base| {
                let _ = propagate(&base, &z, 0.1, 0.0, 30.0).unwrap();
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function(BenchmarkId::new("hexagonal_base", 6), |b| {
        let hex = create_zero_state_polygon(0.1, -2.0, 2.0).unwrap();
        b.iter_batched(
            || hex.clone(),
            |base| {
                let _ = propagate(&base, &z, 0.1, -5.0, 5.0).unwrap();
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_propagate);
criterion_main!(benches);
