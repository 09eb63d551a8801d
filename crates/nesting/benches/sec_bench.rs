//! Criterion benchmarks for the smallest enclosing circle algorithm.
//!
//! Runs Welzl's randomized-incremental construction on random point clouds
//! of varying size with a fixed seed, matching the deterministic-replay
//! contract the nesting criteria rely on.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use nesting::geom::point::Point;
use nesting::sec::smallest_enclosing_circle;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_points(n: usize, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| Point::new(rng.gen_range(-1000.0..1000.0), rng.gen_range(-1000.0..1000.0)))
        .collect()
}

fn bench_sec(c: &mut Criterion) {
    let mut group = c.benchmark_group("smallest_enclosing_circle");
    for &n in &[10usize, 50, 200, 1000, 5000] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter_batched(
                || random_points(n, 11 + n as u64),
                |pts| {
                    let _ = black_box(smallest_enclosing_circle(&pts, 42));
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sec);
criterion_main!(benches);
