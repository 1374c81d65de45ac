//! Criterion benchmarks for recursive collision splitting.
//! Focus sizes: rectangle counts in {10, 100} against a single fixed obstacle.
//! Results: by default under target/criterion; to store under data/bench, run:
//!   CARGO_TARGET_DIR=data/bench cargo bench -p reachset --bench collision_bench

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use reachset::aabb::Aabb;
use reachset::collision::{check_collision_and_split_rectangles, CollisionChecker, CollisionStep};

struct Obstacle {
    aabb: Aabb,
}

impl CollisionStep for Obstacle {
    fn collides(&self, aabb: Aabb) -> Result<bool, String> {
        Ok(aabb.overlaps_strict(&self.aabb))
    }
}

struct FixedChecker {
    aabb: Aabb,
}

impl CollisionChecker for FixedChecker {
    type Step<'a> = Obstacle;
    fn at(&self, _step: usize) -> Obstacle {
        Obstacle { aabb: self.aabb }
    }
}

fn grid_rects(n: usize) -> Vec<Aabb> {
    (0..n)
        .map(|i| {
            let x = i as f64;
            Aabb::new(x, 0.0, x + 1.0, 1.0)
        })
        .collect()
}

fn bench_collision_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("collision_split");
    let checker = FixedChecker { aabb: Aabb::new(4.4, -1.0, 6.6, 2.0) };

    for &n in &[10usize, 100] {
        group.bench_with_input(BenchmarkId::new("rectangles", n), &n, |b, &n| {
            b.iter_batched(
                || grid_rects(n),
                |rects| {
                    let _ = check_collision_and_split_rectangles(0, &checker, &rects, 0.01, 4).unwrap();
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_collision_split);
criterion_main!(benches);
