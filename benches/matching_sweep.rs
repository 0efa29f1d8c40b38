//! Benchmarks a buy-side market sweep through many resting offer levels,
//! the one scenario from the concurrent suite that still applies once
//! matching is synchronous.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use orderbook_rs::{MatchingEngine, Order, Side};

fn build_book_with_levels(levels: u64) -> MatchingEngine {
    let mut engine = MatchingEngine::with_seed(42);
    let offers: Vec<Order> = (0..levels)
        .map(|i| {
            Order::limit_default_digits(
                Side::Sell,
                10.0 + i as f64 * 0.1,
                5.0,
                0,
                format!("offer-{i}"),
                "maker",
                None,
            )
        })
        .collect();
    engine.tick(0, offers);
    engine
}

fn sweep_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("market_sweep");
    for levels in [10u64, 100, 1_000] {
        group.bench_with_input(BenchmarkId::from_parameter(levels), &levels, |b, &levels| {
            b.iter_batched(
                || build_book_with_levels(levels),
                |mut engine| {
                    let sweep = Order::market(Side::Buy, levels as f64 * 5.0, 1, "sweep", "taker", None);
                    engine.tick(1, [sweep])
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, sweep_benchmark);
criterion_main!(benches);
