use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use shapley::{Mode, ShapleyInput, ValueFunction};
use std::hint::black_box;

/// Synthetic superadditive game over n players: worth grows with coalition
/// size plus a mask-dependent wrinkle so no two coalitions tie.
fn synthetic_game(n: usize) -> (Vec<u32>, ValueFunction<u32>) {
    let players: Vec<u32> = (1..=n as u32).collect();
    let mut vf = ValueFunction::new();

    for mask in 1u32..(1 << n) {
        let members: Vec<u32> = players
            .iter()
            .copied()
            .filter(|p| mask & (1 << (p - 1)) != 0)
            .collect();
        let size = mask.count_ones() as f64;
        vf.insert(members, size * size + (mask as f64) * 1e-3);
    }

    (players, vf)
}

fn bench_exact(c: &mut Criterion) {
    let mut group = c.benchmark_group("exact");

    for n in [4, 6, 8] {
        let (players, vf) = synthetic_game(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                let input = ShapleyInput::new(black_box(players.clone()), black_box(vf.clone()));
                input.compute().unwrap()
            })
        });
    }

    group.finish();
}

fn bench_monte_carlo(c: &mut Criterion) {
    let mut group = c.benchmark_group("monte_carlo");

    for samples in [1_000u64, 10_000] {
        let (players, vf) = synthetic_game(10);
        group.bench_with_input(
            BenchmarkId::from_parameter(samples),
            &samples,
            |b, &samples| {
                b.iter(|| {
                    ShapleyInput::new(black_box(players.clone()), black_box(vf.clone()))
                        .with_mode(Mode::MonteCarlo { samples, seed: 7 })
                        .compute()
                        .unwrap()
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_exact, bench_monte_carlo);
criterion_main!(benches);
