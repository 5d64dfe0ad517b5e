//! [`CrystalMap`]: an infinite periodic map reconstructed from one stored
//! asymmetric unit.
//!
//! Each ASU voxel carries a one-byte flag:
//!
//! - `0`: canonical, the voxel owns its value;
//! - `k + 1`: operator `k` maps the voxel onto its canonical partner;
//! - `255`: unresolved, only seen during initialisation.

use crate::config::{CrystalConfig, CrystalConfigError};
use crate::iter::XtalExtentIterator;
use crate::symop::IntSymOp;
use tracing::{debug, error};
use xtalmap_core::{Extent, Point};
use xtalmap_map::{MapState, Spatial};

/// ASU flag of a canonical voxel.
pub const CANONICAL: u8 = 0;

/// ASU flag of a voxel not yet classified.
pub const UNRESOLVED: u8 = 255;

/// Result of resolving a lattice point onto the stored ASU.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SymMatch {
    /// Canonical ASU voxel holding the value.
    pub point: Point,
    /// Index of the operator that maps the query onto `point`.
    pub op: usize,
}

/// A periodic, symmetric real-space map that stores a single ASU.
#[derive(Clone, Debug, PartialEq)]
pub struct CrystalMap {
    map: MapState<f32, Spatial>,
    unit_cell: Extent,
    symops: Vec<IntSymOp>,
    asu: Vec<u8>,
}

impl CrystalMap {
    /// A zero-filled crystal map.
    ///
    /// # Errors
    ///
    /// Returns the first [`CrystalConfigError`] found by
    /// [`CrystalConfig::validate`].
    pub fn new(config: CrystalConfig) -> Result<Self, CrystalConfigError> {
        let map = MapState::new(config.asu);
        Self::from_map(map, config)
    }

    /// Wrap an existing ASU map.
    ///
    /// # Errors
    ///
    /// Returns [`CrystalConfigError::MapExtentMismatch`] if `map` does not
    /// cover `config.asu` exactly, or any error from
    /// [`CrystalConfig::validate`].
    pub fn from_map(
        map: MapState<f32, Spatial>,
        config: CrystalConfig,
    ) -> Result<Self, CrystalConfigError> {
        config.validate()?;
        if map.extent() != config.asu {
            return Err(CrystalConfigError::MapExtentMismatch {
                expected: config.asu,
                actual: map.extent(),
            });
        }
        let mut xtal = Self {
            asu: vec![UNRESOLVED; config.asu.volume()],
            map,
            unit_cell: config.unit_cell,
            symops: config.symops,
        };
        xtal.init();
        Ok(xtal)
    }

    fn init(&mut self) {
        let asu = self.asu_extent();

        // Canonical unless a non-identity operator lands on a different,
        // already canonical voxel.
        for (offset, p) in asu.points().enumerate() {
            let duplicate = self.symops[1..].iter().any(|op| {
                let q = self.to_unit_cell(op.transform(p));
                q != p && self.flag(q) == Some(CANONICAL)
            });
            if !duplicate {
                self.asu[offset] = CANONICAL;
            }
        }

        // Every remaining voxel points at the first operator that reaches
        // a canonical voxel.
        for (offset, p) in asu.points().enumerate() {
            if self.asu[offset] != UNRESOLVED {
                continue;
            }
            let found = self.symops.iter().position(|op| {
                self.flag(self.to_unit_cell(op.transform(p))) == Some(CANONICAL)
            });
            match found {
                Some(k) => self.asu[offset] = (k + 1) as u8,
                None => error!(point = %p, "asymmetric unit voxel has no canonical partner"),
            }
        }

        debug!(
            canonical = self.canonical_count(),
            voxels = self.asu.len(),
            symops = self.symops.len(),
            "crystal map initialised"
        );
    }

    /// The stored ASU map.
    pub fn asu_map(&self) -> &MapState<f32, Spatial> {
        &self.map
    }

    /// Consume and return the stored ASU map.
    pub fn into_map(self) -> MapState<f32, Spatial> {
        self.map
    }

    /// Extent of the stored ASU.
    pub fn asu_extent(&self) -> Extent {
        self.map.extent()
    }

    /// One lattice period.
    pub fn unit_cell(&self) -> Extent {
        self.unit_cell
    }

    /// Symmetry operators, identity first.
    pub fn symops(&self) -> &[IntSymOp] {
        &self.symops
    }

    /// ASU flag of `p`, or `None` outside the ASU.
    pub fn flag(&self, p: Point) -> Option<u8> {
        self.asu_extent().offset_of(p).map(|o| self.asu[o])
    }

    /// Whether `p` is a canonical ASU voxel.
    #[inline]
    pub fn is_canonical(&self, p: Point) -> bool {
        self.flag(p) == Some(CANONICAL)
    }

    /// Number of canonical voxels.
    pub fn canonical_count(&self) -> usize {
        self.asu.iter().filter(|&&f| f == CANONICAL).count()
    }

    /// Wrap `p` into the unit cell.
    #[inline]
    pub fn to_unit_cell(&self, p: Point) -> Point {
        self.unit_cell.wrap_around(p)
    }

    /// Resolve any lattice point onto its canonical ASU voxel.
    ///
    /// Returns `None`, after logging an error, if the operators and ASU
    /// are inconsistent and no canonical voxel can be reached.
    pub fn find_sym(&self, p: Point) -> Option<SymMatch> {
        let w = self.to_unit_cell(p);
        match self.flag(w) {
            Some(CANONICAL) => return Some(SymMatch { point: w, op: 0 }),
            Some(f) if f != UNRESOLVED => {
                let op = usize::from(f) - 1;
                let point = self.to_unit_cell(self.symops[op].transform(w));
                return Some(SymMatch { point, op });
            }
            _ => {}
        }
        for (op, symop) in self.symops.iter().enumerate().skip(1) {
            let q = self.to_unit_cell(symop.transform(w));
            if self.is_canonical(q) {
                return Some(SymMatch { point: q, op });
            }
        }
        error!(point = %p, wrapped = %w, "no symmetry operator reaches the asymmetric unit");
        None
    }

    /// Value at any lattice point; zero if it cannot be resolved.
    pub fn get_real(&self, p: Point) -> f32 {
        self.find_sym(p).map_or(0.0, |m| self.map.value(m.point))
    }

    /// Store `v` at the canonical voxel of `p`, which changes every
    /// symmetry image of `p`. Returns `false` if `p` cannot be resolved.
    pub fn set_real(&mut self, p: Point, v: f32) -> bool {
        match self.find_sym(p) {
            Some(m) => {
                *self.map.value_mut(m.point) = v;
                true
            }
            None => false,
        }
    }

    /// Walk a box of the infinite crystal in storage order.
    pub fn iter_extent(&self, extent: Extent) -> XtalExtentIterator<'_> {
        XtalExtentIterator::new(self, extent)
    }

    /// Materialise a box of the infinite crystal as a plain map.
    pub fn expand(&self, extent: Extent) -> MapState<f32, Spatial> {
        let mut out = MapState::new(extent);
        out.set_sampling(self.map.sampling().clone());
        out.set_origin(self.map.origin());
        for voxel in self.iter_extent(extent) {
            if let Some(m) = voxel.resolved {
                out.set(voxel.point, self.map.value(m.point));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xtalmap_core::Size;

    fn p(x: i32, y: i32, z: i32) -> Point {
        Point::new(x, y, z)
    }

    /// Identity plus a 180° turn about the centre of a 4×1×1 cell.
    fn two_fold() -> CrystalConfig {
        CrystalConfig {
            unit_cell: Extent::at_origin(Size::new(4, 1, 1)),
            asu: Extent::at_origin(Size::new(4, 1, 1)),
            symops: vec![
                IntSymOp::IDENTITY,
                IntSymOp::new([[-1, 0, 0], [0, -1, 0], [0, 0, 1]], p(3, 0, 0)),
            ],
        }
    }

    #[test]
    fn two_fold_flags() {
        let x = CrystalMap::new(two_fold()).unwrap();
        assert_eq!(x.flag(p(0, 0, 0)), Some(CANONICAL));
        assert_eq!(x.flag(p(1, 0, 0)), Some(CANONICAL));
        assert_eq!(x.flag(p(2, 0, 0)), Some(2));
        assert_eq!(x.flag(p(3, 0, 0)), Some(2));
        assert_eq!(x.canonical_count(), 2);
    }

    #[test]
    fn find_sym_on_rotated_image_returns_original() {
        let x = CrystalMap::new(two_fold()).unwrap();
        let original = p(1, 0, 0);
        let image = x.to_unit_cell(x.symops()[1].transform(original));
        assert_eq!(image, p(2, 0, 0));
        assert_eq!(
            x.find_sym(image),
            Some(SymMatch {
                point: original,
                op: 1
            })
        );
        assert_eq!(x.find_sym(p(-3, 0, 0)), Some(SymMatch { point: original, op: 0 }));
    }

    #[test]
    fn writes_are_shared_by_symmetry_images() {
        let mut x = CrystalMap::new(two_fold()).unwrap();
        assert!(x.set_real(p(3, 0, 0), 5.0));
        assert_eq!(x.get_real(p(0, 0, 0)), 5.0);
        assert_eq!(x.get_real(p(7, 0, 0)), 5.0);
        assert_eq!(x.get_real(p(-4, 0, 0)), 5.0);
    }

    #[test]
    fn outside_asu_resolves_by_operator_scan() {
        let mut c = two_fold();
        c.asu = Extent::new(p(0, 0, 0), p(1, 0, 0));
        let x = CrystalMap::new(c).unwrap();
        assert_eq!(x.canonical_count(), 2);
        assert_eq!(x.find_sym(p(3, 0, 0)), Some(SymMatch { point: p(0, 0, 0), op: 1 }));
    }

    #[test]
    fn missing_orbit_is_reported_as_none() {
        let c = CrystalConfig {
            unit_cell: Extent::at_origin(Size::new(4, 1, 1)),
            asu: Extent::new(p(0, 0, 0), p(1, 0, 0)),
            symops: vec![IntSymOp::IDENTITY],
        };
        let x = CrystalMap::new(c).unwrap();
        assert_eq!(x.find_sym(p(2, 0, 0)), None);
        assert_eq!(x.get_real(p(2, 0, 0)), 0.0);
    }

    #[test]
    fn from_map_requires_matching_extent() {
        let map = MapState::new(Extent::at_origin(Size::new(2, 1, 1)));
        assert!(matches!(
            CrystalMap::from_map(map, two_fold()),
            Err(CrystalConfigError::MapExtentMismatch { .. })
        ));
    }
}
