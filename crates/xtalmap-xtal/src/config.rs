//! Crystal map configuration, validation, and error types.

use std::error::Error;
use std::fmt;

use crate::symop::IntSymOp;
use xtalmap_core::Extent;

/// Largest operator count the one-byte ASU table can encode (flags
/// `1..=254`; 255 marks an unresolved voxel).
pub const MAX_SYMOPS: usize = 254;

/// Errors detected when validating a [`CrystalConfig`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CrystalConfigError {
    /// No symmetry operators were supplied.
    NoSymops,
    /// Operator 0 must be the identity.
    FirstNotIdentity,
    /// More operators than the ASU table can encode.
    TooManySymops {
        /// Operators supplied.
        count: usize,
    },
    /// The ASU is not contained in the unit cell.
    AsuOutsideCell {
        /// Supplied ASU.
        asu: Extent,
        /// Supplied unit cell.
        unit_cell: Extent,
    },
    /// The supplied map does not cover the ASU extent exactly.
    MapExtentMismatch {
        /// Extent the map must have.
        expected: Extent,
        /// Extent the map has.
        actual: Extent,
    },
}

impl fmt::Display for CrystalConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSymops => write!(f, "at least one symmetry operator is required"),
            Self::FirstNotIdentity => write!(f, "symmetry operator 0 must be the identity"),
            Self::TooManySymops { count } => {
                write!(f, "{count} symmetry operators exceed the maximum of {MAX_SYMOPS}")
            }
            Self::AsuOutsideCell { asu, unit_cell } => {
                write!(f, "asymmetric unit {asu} is not inside unit cell {unit_cell}")
            }
            Self::MapExtentMismatch { expected, actual } => {
                write!(f, "map extent {actual} does not match asymmetric unit {expected}")
            }
        }
    }
}

impl Error for CrystalConfigError {}

/// Everything needed to build a [`CrystalMap`](crate::CrystalMap).
#[derive(Clone, Debug, PartialEq)]
pub struct CrystalConfig {
    /// One period of the lattice.
    pub unit_cell: Extent,
    /// The stored asymmetric unit; must lie inside `unit_cell`.
    pub asu: Extent,
    /// Symmetry operators, identity first.
    pub symops: Vec<IntSymOp>,
}

impl CrystalConfig {
    /// Validate all structural invariants.
    ///
    /// # Errors
    ///
    /// Returns the first [`CrystalConfigError`] found.
    pub fn validate(&self) -> Result<(), CrystalConfigError> {
        // 1. At least one operator, identity first.
        let Some(first) = self.symops.first() else {
            return Err(CrystalConfigError::NoSymops);
        };
        if !first.is_identity() {
            return Err(CrystalConfigError::FirstNotIdentity);
        }
        // 2. Operator index + 1 must fit below the 255 sentinel.
        if self.symops.len() > MAX_SYMOPS {
            return Err(CrystalConfigError::TooManySymops {
                count: self.symops.len(),
            });
        }
        // 3. ASU inside the unit cell.
        if !self.unit_cell.contains_extent(&self.asu) {
            return Err(CrystalConfigError::AsuOutsideCell {
                asu: self.asu,
                unit_cell: self.unit_cell,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xtalmap_core::{Point, Size};

    fn valid() -> CrystalConfig {
        CrystalConfig {
            unit_cell: Extent::at_origin(Size::cube(4)),
            asu: Extent::new(Point::ORIGIN, Point::new(1, 3, 3)),
            symops: vec![IntSymOp::IDENTITY],
        }
    }

    #[test]
    fn validate_valid_config_succeeds() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn validate_empty_symops_fails() {
        let mut c = valid();
        c.symops.clear();
        assert_eq!(c.validate(), Err(CrystalConfigError::NoSymops));
    }

    #[test]
    fn validate_non_identity_first_fails() {
        let mut c = valid();
        c.symops[0] = IntSymOp::new([[-1, 0, 0], [0, 1, 0], [0, 0, 1]], Point::ORIGIN);
        assert_eq!(c.validate(), Err(CrystalConfigError::FirstNotIdentity));
    }

    #[test]
    fn validate_too_many_symops_fails() {
        let mut c = valid();
        c.symops = vec![IntSymOp::IDENTITY; MAX_SYMOPS + 1];
        assert_eq!(
            c.validate(),
            Err(CrystalConfigError::TooManySymops {
                count: MAX_SYMOPS + 1
            })
        );
    }

    #[test]
    fn validate_asu_outside_cell_fails() {
        let mut c = valid();
        c.asu = Extent::new(Point::ORIGIN, Point::new(4, 0, 0));
        assert!(matches!(
            c.validate(),
            Err(CrystalConfigError::AsuOutsideCell { .. })
        ));
    }
}
