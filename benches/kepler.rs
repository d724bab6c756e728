use criterion::{black_box, criterion_group, criterion_main, Criterion};

use orrery::keplerlib::{eccentric_anomaly, true_anomaly};

/// Deterministic pseudo-random sequence, good enough for spreading inputs
/// over the (eccentricity, mean anomaly) plane without pulling in an RNG.
fn inputs(n: usize, e_max: f64) -> Vec<(f64, f64)> {
    let mut state = 0x9E3779B97F4A7C15u64;
    (0..n)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let a = (state >> 11) as f64 / (1u64 << 53) as f64;
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let b = (state >> 11) as f64 / (1u64 << 53) as f64;
            (a * e_max, b * std::f64::consts::TAU)
        })
        .collect()
}

/// Planetary regime: e ≤ 0.25 (everything from Venus to Pluto)
fn bench_planetary(c: &mut Criterion) {
    let cases = inputs(10_000, 0.25);
    c.bench_function("eccentric_anomaly/planetary_e<=0.25", |b| {
        b.iter(|| {
            for &(s, m) in &cases {
                let ea = eccentric_anomaly(black_box(s), black_box(m)).unwrap();
                black_box(ea);
            }
        })
    });
}

/// High-eccentricity regime: e ≤ 0.95 (comet-like orbits)
fn bench_high_e(c: &mut Criterion) {
    let cases = inputs(10_000, 0.95);
    c.bench_function("eccentric_anomaly/high_e<=0.95", |b| {
        b.iter(|| {
            for &(s, m) in &cases {
                let _ = eccentric_anomaly(black_box(s), black_box(m));
            }
        })
    });
}

/// Full anomaly chain as the planetary pipeline uses it
fn bench_full_chain(c: &mut Criterion) {
    let cases = inputs(10_000, 0.25);
    c.bench_function("eccentric_anomaly/with_true_anomaly", |b| {
        b.iter(|| {
            for &(s, m) in &cases {
                let ea = eccentric_anomaly(black_box(s), black_box(m)).unwrap();
                black_box(true_anomaly(s, ea));
            }
        })
    });
}

criterion_group!(benches, bench_planetary, bench_high_e, bench_full_chain);
criterion_main!(benches);
