//! Benchmarks of the per-character extraction steps.
//!
//! Sampling and tracing dominate a run, so this should be run when making
//! changes to either.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use glyphgen::procedural::{draw_glyph, ShapeCounts};
use glyphgen::sample::char_rng;
use glyphgen::{trace, vectorize, BinaryMask, FontMetrics, RegionSampler};
use kurbo::BezPath;

/// Concentric rings, which trace into many nested contours.
fn rings(size: u32) -> BinaryMask {
    let center = f64::from(size) / 2.0;
    BinaryMask::from_fn(size, size, |x, y| {
        let distance = (f64::from(x) - center).hypot(f64::from(y) - center);
        (distance as u32 / 8) % 2 == 0
    })
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let source = rings(1200);
    let window = rings(200);

    c.bench_function("sample 300 windows", |b| {
        let sampler = RegionSampler::new(200, 200, 0.4, 300);
        b.iter(|| {
            sampler.sample(black_box(&source), 0.5, &mut char_rng('A')).unwrap();
        })
    });
    c.bench_function("trace rings", |b| {
        b.iter(|| {
            trace::trace(black_box(&window));
        })
    });
    c.bench_function("vectorize rings", |b| {
        b.iter(|| {
            vectorize::vectorize(black_box(&window), 600.0, 700.0);
        })
    });
    c.bench_function("procedural glyph", |b| {
        let metrics = FontMetrics::default();
        b.iter(|| {
            let mut path = BezPath::new();
            draw_glyph(&mut path, black_box('g'), &metrics, ShapeCounts::default());
            path
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
