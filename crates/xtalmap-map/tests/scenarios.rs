//! Integration tests: end-to-end map scenarios through the dynamic
//! [`AnyMap`] surface and the spectral seam.

use xtalmap_core::{Extent, MapKind, Point, Size};
use xtalmap_map::{to_half_frequency, to_spatial, AnyMap, Complex32, CompoundOp};
use xtalmap_test_utils::{noise_map, ramp_map, ramp_value, NaiveDft};

fn p(x: i32, y: i32, z: i32) -> Point {
    Point::new(x, y, z)
}

// ── Extraction ──────────────────────────────────────────────────────

#[test]
fn extract_sub_box_of_ramp() {
    let map = AnyMap::from(ramp_map(Extent::at_origin(Size::cube(4))));
    let sub = map.extract(Extent::new(p(1, 1, 1), p(2, 2, 2)));
    assert_eq!(sub.kind(), MapKind::REAL_SPATIAL);
    assert_eq!(sub.extent(), Extent::new(p(1, 1, 1), p(2, 2, 2)));
    assert_eq!(sub.get_real(p(1, 1, 1)), 111.0);
    assert_eq!(sub.get_real(p(2, 1, 2)), 212.0);
    assert_eq!(sub.get_real(p(2, 2, 2)), 222.0);
    assert_eq!(sub.get_real(p(0, 0, 0)), 0.0);
}

#[test]
fn extract_past_the_edge_zero_fills() {
    let map = AnyMap::from(ramp_map(Extent::at_origin(Size::cube(4))));
    let sub = map.extract(Extent::new(p(2, 2, 2), p(5, 5, 5)));
    assert_eq!(sub.get_real(p(3, 3, 3)), ramp_value(p(3, 3, 3)));
    assert_eq!(sub.get_real(p(4, 3, 3)), 0.0);
    assert_eq!(sub.get_real(p(5, 5, 5)), 0.0);
}

#[test]
fn ramp_stats() {
    let map = AnyMap::from(ramp_map(Extent::at_origin(Size::cube(4))));
    let s = map.stats();
    assert_eq!(s.min, 0.0);
    assert_eq!(s.max, 333.0);
    assert!((s.mean - 166.5).abs() < 1e-9);
}

// ── Packed spectra ──────────────────────────────────────────────────

#[test]
fn half_frequency_layout_and_conjugate_reads() {
    let mut map = AnyMap::new(MapKind::COMPLEX_HALF_FREQUENCY, Extent::at_origin(Size::cube(4)));
    assert_eq!(map.physical_size(), Size::new(4, 4, 3));
    assert_eq!(map.extent(), Extent::new(p(-1, -1, -1), p(2, 2, 2)));

    let v = Complex32::new(1.0, 2.0);
    assert!(map.set_complex(p(1, -1, 2), v));
    assert_eq!(map.get_complex(p(1, -1, 2)), v);
    assert_eq!(map.get_complex(p(-1, 1, -2)), v.conj());

    // Negative z is only reachable through its conjugate partner.
    assert!(!map.set_complex(p(0, 0, -1), v));
    assert!(!map.contains(p(3, 0, 0)));
}

#[test]
fn delta_at_origin_has_a_flat_spectrum() {
    let extent = Extent::from_size(p(-2, -2, -2), Size::cube(4));
    let mut map = ramp_map(extent);
    map.fill(0.0);
    map.set_real(Point::ORIGIN, 1.0);

    let spectrum = to_half_frequency(&map, &mut NaiveDft);
    for (k, v) in spectrum.cells() {
        assert!((v - Complex32::new(1.0, 0.0)).norm() < 1e-5, "k={k}: {v}");
    }
}

#[test]
fn spectral_round_trip_restores_the_map() {
    let extent = Extent::from_size(p(-1, 2, 0), Size::new(4, 3, 2));
    let map = noise_map(extent, 7);
    let spectrum = to_half_frequency(&map, &mut NaiveDft);
    assert_eq!(spectrum.logical_size(), extent.size());

    let back = to_spatial(&spectrum, extent.start(), &mut NaiveDft).unwrap();
    assert_eq!(back.extent(), extent);
    for q in extent.points() {
        let (a, b) = (map.get_real(q), back.get_real(q));
        assert!((a - b).abs() < 1e-4, "{q}: {a} vs {b}");
    }
}

#[test]
fn spectrum_unpacks_into_a_full_frequency_map() {
    let extent = Extent::at_origin(Size::new(4, 2, 2));
    let spectrum = to_half_frequency(&ramp_map(extent), &mut NaiveDft);
    let mut full = AnyMap::new(MapKind::COMPLEX_FREQUENCY, Extent::at_origin(extent.size()));
    let overlap = full.paste(&AnyMap::from(spectrum.clone())).unwrap();
    assert_eq!(overlap, Extent::new(p(-1, 0, 0), p(1, 0, 0)));
    for k in overlap.points() {
        assert_eq!(full.get_complex(k), spectrum.get_complex(k), "{k}");
    }
    // (-1, 0, 0) is folded; it must read as the conjugate of (1, 0, 0).
    let folded = full.get_complex(p(-1, 0, 0));
    assert!((folded - spectrum.get_complex(p(1, 0, 0)).conj()).norm() < 1e-6);
}

// ── Arithmetic across kinds ─────────────────────────────────────────

#[test]
fn add_real_into_complex_then_scale() {
    let extent = Extent::at_origin(Size::new(2, 2, 1));
    let mut dst = AnyMap::new(MapKind::COMPLEX_SPATIAL, extent);
    dst.apply_scalar(CompoundOp::Assign, Complex32::new(0.0, 1.0));
    let src = AnyMap::from(ramp_map(extent));
    assert_eq!(dst.apply_map(CompoundOp::Add, &src), Some(extent));
    dst.apply_scalar(CompoundOp::Mul, Complex32::new(2.0, 0.0));
    assert_eq!(dst.get_complex(p(1, 1, 0)), Complex32::new(22.0, 2.0));
}
