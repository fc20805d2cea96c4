use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use expedition::core::types::Vec2;
use expedition::scheduler::{order_by_proximity, BacktrackRule};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn course_positions(count: usize) -> Vec<Option<Vec2>> {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    (0..count)
        .map(|_| Some(Vec2::new(rng.gen_range(0.0..200.0), rng.gen_range(-3.0..3.0))))
        .collect()
}

fn bench_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_by_proximity");
    let rules = [
        ("plain", BacktrackRule::default()),
        (
            "biased",
            BacktrackRule {
                max_backtrack_distance: 5.0,
                weight: 0.5,
            },
        ),
    ];

    for count in [16, 64, 256] {
        let positions = course_positions(count);
        for (name, rule) in &rules {
            group.bench_with_input(BenchmarkId::new(*name, count), &positions, |b, positions| {
                b.iter(|| order_by_proximity(black_box(Vec2::default()), black_box(positions), rule))
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_order);
criterion_main!(benches);
