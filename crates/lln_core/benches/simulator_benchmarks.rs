//! Criterion benchmarks for the trial simulator.
//!
//! Binomial sampling should stay cheap even for n = 10,000,000, since the
//! draw does not iterate over individual trials.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lln_core::presenter::ResultTable;
use lln_core::{simulate, Probability, SampleSizes, TrialRng};

/// Benchmark one binomial draw across sample sizes.
fn bench_binomial_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("binomial_draw");
    let p = Probability::new(0.37).unwrap();

    for n in [10u64, 1_000, 10_000_000] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut rng = TrialRng::from_seed(42);
            b.iter(|| rng.gen_binomial(black_box(n), p).unwrap());
        });
    }

    group.finish();
}

/// Benchmark a full run, with and without the large sample size.
fn bench_simulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulate");
    let p = Probability::new(0.5).unwrap();

    for include_large in [false, true] {
        let sizes = SampleSizes::with_large(include_large);
        group.bench_with_input(
            BenchmarkId::new("include_large", include_large),
            &sizes,
            |b, sizes| {
                let mut rng = TrialRng::from_seed(42);
                b.iter(|| simulate(p, black_box(sizes), &mut rng).unwrap());
            },
        );
    }

    group.finish();
}

/// Benchmark table formatting.
fn bench_table(c: &mut Criterion) {
    let p = Probability::new(0.5).unwrap();
    let mut rng = TrialRng::from_seed(42);
    let results = simulate(p, &SampleSizes::with_large(true), &mut rng).unwrap();

    c.bench_function("result_table", |b| {
        b.iter(|| ResultTable::from_results(black_box(&results)));
    });
}

criterion_group!(benches, bench_binomial_draw, bench_simulate, bench_table);
criterion_main!(benches);
