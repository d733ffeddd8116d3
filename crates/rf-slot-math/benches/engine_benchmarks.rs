//! Slot Engine Benchmarks
//!
//! Hot-path costs: screen generation, line evaluation, full trials.

use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rf_slot_math::{GameMode, GameTables, Screen, SlotEngine, SpinEvaluation, TrialAccumulator};

fn tables(mode: GameMode) -> Arc<GameTables> {
    Arc::new(GameTables::for_mode(mode).expect("valid tables"))
}

/// Benchmark base screen generation
fn bench_screen_generate(c: &mut Criterion) {
    let tables = tables(GameMode::Normal);
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut screen = Screen::default();

    c.bench_function("screen_generate", |b| {
        b.iter(|| {
            screen.generate(
                &tables.base_reels[0],
                &tables.base_wilds,
                &tables.base_scatters,
                &mut rng,
            );
            black_box(&screen);
        })
    });
}

/// Benchmark 15-line evaluation on pre-generated screens
fn bench_evaluate(c: &mut Criterion) {
    let tables = tables(GameMode::Normal);
    let mut rng = ChaCha8Rng::seed_from_u64(43);
    let screens: Vec<Screen> = (0..1024)
        .map(|_| {
            let mut screen = Screen::default();
            screen.generate(
                &tables.base_reels[1],
                &tables.base_wilds,
                &tables.base_scatters,
                &mut rng,
            );
            screen
        })
        .collect();
    let mut out = SpinEvaluation::default();

    let mut group = c.benchmark_group("evaluate");
    group.throughput(Throughput::Elements(screens.len() as u64));
    group.bench_function("lines_and_scatter", |b| {
        b.iter(|| {
            for screen in &screens {
                tables.pay_table.evaluate_into(screen, 1, &mut out);
                black_box(out.total_win);
            }
        })
    });
    group.finish();
}

/// Benchmark full trials per mode
fn bench_trials(c: &mut Criterion) {
    let mut group = c.benchmark_group("trials");
    let batch = 10_000u64;
    group.throughput(Throughput::Elements(batch));

    for mode in [GameMode::Normal, GameMode::BuyBonus] {
        let tables = tables(mode);
        let mut engine = SlotEngine::with_seed(tables.clone(), 44);
        group.bench_with_input(BenchmarkId::new("run", mode), &batch, |b, &n| {
            b.iter(|| {
                let mut acc = TrialAccumulator::new(tables.stake());
                engine.run(n, &mut acc);
                black_box(acc.total_win)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_screen_generate, bench_evaluate, bench_trials);
criterion_main!(benches);
