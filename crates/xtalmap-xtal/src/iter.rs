//! Sequential traversal of the infinite crystal.
//!
//! Within a row the canonical position moves by a fixed per-operator delta
//! (column 0 of the rotation), so most steps cost one addition and one
//! table lookup. A full [`CrystalMap::find_sym`] is only needed when the
//! advanced position leaves the ASU or lands on a non-canonical voxel,
//! and at the start of every row.

use crate::crystal::{CrystalMap, SymMatch};
use xtalmap_core::{Extent, ExtentPoints, Point};

/// One visited lattice point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct XtalVoxel {
    /// Point of the infinite crystal.
    pub point: Point,
    /// Canonical ASU voxel for `point`, or `None` if it cannot be resolved.
    pub resolved: Option<SymMatch>,
}

/// Iterator over a box of a [`CrystalMap`] in storage order.
#[derive(Clone, Debug)]
pub struct XtalExtentIterator<'a> {
    xtal: &'a CrystalMap,
    points: ExtentPoints,
    deltas: Vec<Point>,
    prev: Option<XtalVoxel>,
    find_sym_calls: usize,
}

impl<'a> XtalExtentIterator<'a> {
    pub(crate) fn new(xtal: &'a CrystalMap, extent: Extent) -> Self {
        Self {
            xtal,
            points: extent.points(),
            deltas: xtal.symops().iter().map(|op| op.column(0)).collect(),
            prev: None,
            find_sym_calls: 0,
        }
    }

    /// Number of full symmetry searches performed so far.
    pub fn find_sym_calls(&self) -> usize {
        self.find_sym_calls
    }

    fn step_within_row(&self, p: Point) -> Option<SymMatch> {
        let prev = self.prev?;
        if prev.point.y != p.y || prev.point.z != p.z || prev.point.x + 1 != p.x {
            return None;
        }
        let m = prev.resolved?;
        let next = m.point + self.deltas[m.op];
        self.xtal.is_canonical(next).then_some(SymMatch {
            point: next,
            op: m.op,
        })
    }
}

impl Iterator for XtalExtentIterator<'_> {
    type Item = XtalVoxel;

    fn next(&mut self) -> Option<XtalVoxel> {
        let point = self.points.next()?;
        let resolved = match self.step_within_row(point) {
            Some(m) => Some(m),
            None => {
                self.find_sym_calls += 1;
                self.xtal.find_sym(point)
            }
        };
        let voxel = XtalVoxel { point, resolved };
        self.prev = Some(voxel);
        Some(voxel)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.points.size_hint()
    }
}

impl ExactSizeIterator for XtalExtentIterator<'_> {}
