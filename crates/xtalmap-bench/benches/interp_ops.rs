//! Criterion micro-benchmarks for trilinear interpolation.

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use xtalmap_bench::probe_points;
use xtalmap_core::{Extent, MapKind, Size};
use xtalmap_map::AnyMap;
use xtalmap_test_utils::ramp_map;

/// Benchmark: 10K trilinear samples of a 64³ real map through the typed state.
fn bench_interpolate_typed_10k(c: &mut Criterion) {
    let extent = Extent::at_origin(Size::cube(64));
    let map = ramp_map(extent);
    let probes = probe_points(extent, 10_000);

    c.bench_function("interpolate_typed_10k", |b| {
        b.iter(|| {
            for p in &probes {
                black_box(map.interpolate_real(p));
            }
        });
    });
}

/// Benchmark: the same samples through the dynamic `AnyMap` surface.
fn bench_interpolate_dynamic_10k(c: &mut Criterion) {
    let extent = Extent::at_origin(Size::cube(64));
    let map = AnyMap::from(ramp_map(extent));
    let probes = probe_points(extent, 10_000);

    c.bench_function("interpolate_dynamic_10k", |b| {
        b.iter(|| {
            for p in &probes {
                black_box(map.interpolate_real(p));
            }
        });
    });
}

/// Benchmark: complex interpolation of a packed spectrum, exercising the
/// Hermitian fold on every tap.
fn bench_interpolate_half_frequency_10k(c: &mut Criterion) {
    let map = AnyMap::new(MapKind::COMPLEX_HALF_FREQUENCY, Extent::at_origin(Size::cube(64)));
    let probes = probe_points(map.extent(), 10_000);

    c.bench_function("interpolate_half_frequency_10k", |b| {
        b.iter(|| {
            for p in &probes {
                black_box(map.interpolate_complex(p));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_interpolate_typed_10k,
    bench_interpolate_dynamic_10k,
    bench_interpolate_half_frequency_10k
);
criterion_main!(benches);
