//! Integration tests: symmetry resolution over small space groups.
//!
//! Every lattice point must resolve to a canonical ASU voxel, every
//! symmetry image of a point must resolve to the same voxel, and the
//! number of canonical voxels must equal the number of orbits in the
//! unit cell.

use proptest::prelude::*;
use xtalmap_core::{Extent, Point, Size};
use xtalmap_test_utils::{ramp_value, spacegroups};
use xtalmap_xtal::{CrystalConfig, CrystalMap, IntSymOp, CANONICAL};

fn crystal(cell: Size, symops: Vec<IntSymOp>) -> CrystalMap {
    CrystalMap::new(spacegroups::config(cell, symops)).unwrap()
}

fn groups(cell: Size) -> Vec<(&'static str, Vec<IntSymOp>)> {
    vec![
        ("P1", spacegroups::p1()),
        ("P-1", spacegroups::p_1bar()),
        ("P2", spacegroups::p2()),
        ("P21", spacegroups::p21(cell)),
        ("P222", spacegroups::p222()),
    ]
}

// ── Orbit counts ────────────────────────────────────────────────────

#[test]
fn canonical_count_equals_orbit_count() {
    // 4×4×4 cell: inversion fixes 8 points, each 2-fold axis fixes 16,
    // the screw axis fixes none.
    let cell = Size::cube(4);
    let expected = [("P1", 64), ("P-1", 36), ("P2", 40), ("P21", 32), ("P222", 28)];
    for ((name, ops), (_, count)) in groups(cell).into_iter().zip(expected) {
        let x = crystal(cell, ops);
        assert_eq!(x.canonical_count(), count, "{name}");
    }
}

#[test]
fn every_asu_voxel_is_classified() {
    let cell = Size::new(5, 4, 3);
    for (name, ops) in groups(cell) {
        let x = crystal(cell, ops);
        for p in x.asu_extent().points() {
            let flag = x.flag(p).unwrap();
            assert!(
                usize::from(flag) <= x.symops().len(),
                "{name}: {p} has flag {flag}"
            );
        }
    }
}

// ── Resolution ──────────────────────────────────────────────────────

#[test]
fn whole_cell_resolves_to_canonical_voxels() {
    let cell = Size::new(4, 6, 5);
    for (name, ops) in groups(cell) {
        let x = crystal(cell, ops);
        for p in Extent::at_origin(cell).points() {
            let m = x.find_sym(p).unwrap_or_else(|| panic!("{name}: {p} unresolved"));
            assert_eq!(x.flag(m.point), Some(CANONICAL), "{name}: {p}");
            assert_eq!(
                x.to_unit_cell(x.symops()[m.op].transform(p)),
                m.point,
                "{name}: op {} does not map {p}",
                m.op
            );
        }
    }
}

#[test]
fn writes_through_one_image_are_seen_by_all() {
    let cell = Size::cube(4);
    let mut x = crystal(cell, spacegroups::p21(cell));
    let p = Point::new(1, 0, 1);
    assert!(x.set_real(p, 7.5));
    let image = x.symops()[1].transform(p);
    assert_eq!(image, Point::new(-1, 2, -1));
    assert_eq!(x.get_real(image), 7.5);
    assert_eq!(x.get_real(image + Point::new(8, -4, 12)), 7.5);
}

// ── Traversal ───────────────────────────────────────────────────────

#[test]
fn iterator_agrees_with_find_sym() {
    let cell = Size::new(4, 4, 3);
    let region = Extent::new(Point::new(-3, -2, -1), Point::new(6, 5, 4));
    for (name, ops) in groups(cell) {
        let x = crystal(cell, ops);
        let mut n = 0;
        for voxel in x.iter_extent(region) {
            let expected = x.find_sym(voxel.point).map(|m| m.point);
            assert_eq!(voxel.resolved.map(|m| m.point), expected, "{name}: {}", voxel.point);
            n += 1;
        }
        assert_eq!(n, region.volume());
    }
}

#[test]
fn p1_iteration_searches_once_per_row() {
    let cell = Size::new(6, 4, 3);
    let x = crystal(cell, spacegroups::p1());
    let mut it = x.iter_extent(Extent::at_origin(cell));
    assert_eq!(it.len(), cell.volume());
    it.by_ref().for_each(drop);
    assert_eq!(it.find_sym_calls(), 4 * 3);
}

#[test]
fn iteration_searches_less_than_every_point() {
    let cell = Size::cube(8);
    let x = crystal(cell, spacegroups::p2());
    let mut it = x.iter_extent(Extent::at_origin(cell));
    it.by_ref().for_each(drop);
    assert!(it.find_sym_calls() < cell.volume() / 2);
}

#[test]
fn expand_reproduces_the_crystal() {
    let cell = Size::cube(4);
    let mut x = crystal(cell, spacegroups::p_1bar());
    for p in x.asu_extent().points() {
        if x.is_canonical(p) {
            x.set_real(p, ramp_value(p));
        }
    }
    let region = Extent::new(Point::new(-4, -4, -3), Point::new(5, 6, 3));
    let out = x.expand(region);
    assert_eq!(out.extent(), region);
    for p in region.points() {
        assert_eq!(out.get_real(p), x.get_real(p), "{p}");
    }
    // Inversion pairs.
    assert_eq!(out.get_real(Point::new(1, 2, 3)), out.get_real(Point::new(-1, -2, -3)));
}

#[test]
fn four_fold_axis_on_full_and_quarter_asu() {
    // Burnside on 4×4×4: (64 + 8 + 16 + 8) / 4 orbits.
    let cell = Size::cube(4);
    let unit_cell = Extent::at_origin(cell);
    let region = Extent::new(Point::new(-2, -3, -1), Point::new(5, 4, 4));
    for asu in [unit_cell, spacegroups::quarter_xy_asu(cell)] {
        let config = CrystalConfig {
            unit_cell,
            asu,
            symops: spacegroups::p4(),
        };
        let x = CrystalMap::new(config).unwrap();
        assert_eq!(x.canonical_count(), 24, "{asu}");
        for p in unit_cell.points() {
            let home = x.find_sym(p).map(|m| m.point);
            assert!(home.is_some(), "{asu}: {p} unresolved");
            for op in x.symops() {
                let q = op.transform(p);
                assert_eq!(x.find_sym(q).map(|m| m.point), home, "{asu}: {p} -> {q}");
            }
        }
        for voxel in x.iter_extent(region) {
            let expected = x.find_sym(voxel.point).map(|m| m.point);
            assert_eq!(voxel.resolved.map(|m| m.point), expected, "{asu}: {}", voxel.point);
        }
    }
}

#[test]
fn duplicates_take_the_lowest_operator_that_reaches_a_canonical_voxel() {
    // Orbit of (1, 0): (1, 0) is first in storage order and canonical.
    let cell = Size::cube(4);
    let unit_cell = Extent::at_origin(cell);
    let x = CrystalMap::new(CrystalConfig {
        unit_cell,
        asu: unit_cell,
        symops: spacegroups::p4(),
    })
    .unwrap();
    for z in 0..4 {
        assert_eq!(x.flag(Point::new(1, 0, z)), Some(CANONICAL));
        // -y, x reaches (1, 0) from (0, 3).
        assert_eq!(x.flag(Point::new(0, 3, z)), Some(2));
        // Only -x, -y reaches it from (3, 0).
        assert_eq!(x.flag(Point::new(3, 0, z)), Some(3));
        // Only y, -x reaches it from (0, 1).
        assert_eq!(x.flag(Point::new(0, 1, z)), Some(4));
        let m = x.find_sym(Point::new(0, 1, z)).unwrap();
        assert_eq!((m.point, m.op), (Point::new(1, 0, z), 3));
    }
}

// ── Operators from fractional input ─────────────────────────────────

#[test]
fn fractional_screw_axis_matches_integer_form() {
    let cell = Size::new(4, 8, 4);
    let rot = nalgebra::Matrix3::new(-1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, -1.0);
    let op = IntSymOp::from_fractional(&rot, &nalgebra::Vector3::new(0.0, 0.5, 0.0), cell);
    assert_eq!(op, spacegroups::p21(cell)[1]);
}

// ── Properties ──────────────────────────────────────────────────────

fn arb_cell() -> impl Strategy<Value = Size> {
    (1u32..6, 1u32..4, 1u32..5).prop_map(|(w, h, d)| Size::new(w, 2 * h, d))
}

fn arb_point() -> impl Strategy<Value = Point> {
    (-12i32..12, -12i32..12, -12i32..12).prop_map(|(x, y, z)| Point::new(x, y, z))
}

proptest! {
    #[test]
    fn images_share_a_canonical_voxel(
        cell in arb_cell(),
        group in 0usize..5,
        p in arb_point(),
    ) {
        let (_, ops) = groups(cell).swap_remove(group);
        let x = crystal(cell, ops);
        let home = x.find_sym(p).map(|m| m.point);
        prop_assert!(home.is_some());
        for op in x.symops() {
            let q = op.transform(p);
            prop_assert_eq!(x.find_sym(q).map(|m| m.point), home);
        }
    }

    #[test]
    fn lattice_translations_are_invisible(
        cell in arb_cell(),
        group in 0usize..5,
        p in arb_point(),
        shift in (-3i32..3, -3i32..3, -3i32..3),
    ) {
        let (_, ops) = groups(cell).swap_remove(group);
        let x = crystal(cell, ops);
        let t = Point::new(
            shift.0 * cell.width as i32,
            shift.1 * cell.height as i32,
            shift.2 * cell.depth as i32,
        );
        prop_assert_eq!(x.find_sym(p + t), x.find_sym(p));
    }
}
