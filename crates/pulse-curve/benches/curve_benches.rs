//! Criterion benchmarks for pulse-curve hot paths.
//!
//! Covers: point price evaluation, curve sampling, and hover interpolation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pulse_core::types::{CurveOptions, EpochParameters, PremiumSeed};
use pulse_curve::engine::compute_ask;
use pulse_curve::sampler::build_curve_points;

fn epoch() -> EpochParameters {
    EpochParameters {
        epoch_index: 7,
        floor: 10.0,
        k: 1000.0,
        premium: PremiumSeed::Accrued {
            rate: 0.01,
            prior_interval_secs: 100.0,
        },
        start_time_secs: 1_700_000_000.0,
        now_time_secs: 1_700_003_600.0,
    }
}

fn bench_compute_ask(c: &mut Criterion) {
    c.bench_function("compute_ask", |b| {
        b.iter(|| compute_ask(black_box(10.0), black_box(1000.0), black_box(Some(1.0)), black_box(1234.5)))
    });
}

fn bench_build_curve(c: &mut Criterion) {
    let e = epoch();
    let opts = CurveOptions::default();

    c.bench_function("build_curve_points_120", |b| {
        b.iter(|| build_curve_points(black_box(&e), black_box(&opts)))
    });

    let dense = opts.with_steps(2_000);
    c.bench_function("build_curve_points_2000", |b| {
        b.iter(|| build_curve_points(black_box(&e), black_box(&dense)))
    });
}

fn bench_hover_query(c: &mut Criterion) {
    let series = build_curve_points(&epoch(), &CurveOptions::default());
    let u = series.u_max() * 0.37;

    c.bench_function("point_at_u", |b| b.iter(|| series.point_at_u(black_box(u))));
}

criterion_group!(benches, bench_compute_ask, bench_build_curve, bench_hover_query);
criterion_main!(benches);
