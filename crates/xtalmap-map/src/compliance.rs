//! Domain contract test helpers.
//!
//! These functions verify that a [`Domain`] policy satisfies the
//! invariants the map engine relies on. Reused across the domain and
//! state test modules.

use crate::domain::{Domain, HalfFrequency};
use indexmap::IndexSet;
use xtalmap_core::{DomainKind, Extent, Index, Point, Size};

fn physical_contains(size: Size, i: Index) -> bool {
    i.x < size.width as usize && i.y < size.height as usize && i.z < size.depth as usize
}

/// Assert that every addressable point resolves inside physical storage.
pub fn assert_locate_in_bounds<D: Domain>(d: &D) {
    let size = d.physical_size();
    for p in d.logical_extent().points() {
        if !d.contains(p) {
            continue;
        }
        let loc = d
            .locate(p)
            .unwrap_or_else(|| panic!("{p} is contained but has no location"));
        assert!(
            physical_contains(size, loc.index),
            "{p} located at {:?}, outside physical size {size}",
            loc.index
        );
    }
}

/// Assert that `locate` is `None` exactly when `contains` is false.
pub fn assert_locate_matches_contains<D: Domain>(d: &D) {
    let grown = Extent::new(
        d.logical_extent().start() - Point::new(2, 2, 2),
        d.logical_extent().end() + Point::new(2, 2, 2),
    );
    for p in grown.points() {
        assert_eq!(
            d.contains(p),
            d.locate(p).is_some(),
            "contains({p}) disagrees with locate({p})"
        );
    }
}

/// Assert that `logical_point` inverts `index_unchecked` on every stored cell.
pub fn assert_logical_point_round_trips<D: Domain>(d: &D) {
    for i in Extent::at_origin(d.physical_size()).points() {
        let idx = Index::new(i.x as usize, i.y as usize, i.z as usize);
        let p = d.logical_point(idx);
        assert!(d.contains(p), "logical_point({idx:?}) = {p} is not addressable");
        assert_eq!(d.index_unchecked(p), idx, "round trip through {p}");
    }
}

/// Assert that non-packed domains address each storage cell exactly once.
pub fn assert_bijective_unless_packed<D: Domain>(d: &D) {
    if D::KIND == DomainKind::HalfFrequency {
        return;
    }
    let seen: IndexSet<Index> = d
        .logical_extent()
        .points()
        .filter_map(|p| d.locate(p).map(|l| l.index))
        .collect();
    assert_eq!(seen.len(), d.physical_size().volume());
    assert_eq!(d.logical_extent().volume(), d.physical_size().volume());
}

/// Assert that a packed spectrum resolves `p` and `-p` to the same cell,
/// with exactly one of the two conjugated.
pub fn assert_hermitian_pairs_share_cells(d: &HalfFrequency) {
    for p in d.logical_extent().points() {
        let (Some(a), Some(b)) = (d.locate(p), d.locate(-p)) else {
            panic!("{p} or its negation is not addressable");
        };
        assert_eq!(a.index, b.index, "{p} and {} resolve apart", -p);
        if p != Point::ORIGIN {
            assert_ne!(a.conjugate, b.conjugate, "{p} and {} fold the same way", -p);
        }
    }
}

/// Run every generic check on a domain.
pub fn run_full_suite<D: Domain>(d: &D) {
    assert_locate_in_bounds(d);
    assert_locate_matches_contains(d);
    assert_logical_point_round_trips(d);
    assert_bijective_unless_packed(d);
}
