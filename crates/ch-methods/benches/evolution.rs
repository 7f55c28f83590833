use ch_methods::EvolutionEngine;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn black_scholes_like_engine() -> EvolutionEngine<'static> {
    EvolutionEngine::new(
        |x| 0.5 * 0.04 * x * x,
        |x| 0.05 * x,
        |_| -0.05,
        20.0,
        300.0,
        500,
    )
}

fn bench_fixed_evolution(c: &mut Criterion) {
    let engine = black_scholes_like_engine();
    let payoff = |x: f64| (x - 100.0).max(0.0);

    c.bench_function("evolve n=100 grid=500", |b| {
        b.iter(|| engine.evolve(&payoff, black_box(1.0), 100).unwrap())
    });

    c.bench_function("evolve n=1000 grid=500", |b| {
        b.iter(|| engine.evolve(&payoff, black_box(1.0), 1000).unwrap())
    });
}

fn bench_adaptive_evolution(c: &mut Criterion) {
    let engine = black_scholes_like_engine();
    let payoff = |x: f64| (x - 100.0).max(0.0);

    c.bench_function("evolve_adaptive tol=1e-2", |b| {
        b.iter(|| {
            engine
                .evolve_adaptive(&payoff, black_box(1.0), 1e-2, 10_000)
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_fixed_evolution, bench_adaptive_evolution);
criterion_main!(benches);
