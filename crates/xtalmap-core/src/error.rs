//! Error types shared by every xtalmap crate.
//!
//! Conditions that the map engine can absorb (writes outside an extent,
//! writes to the redundant half of packed spectra, arithmetic between
//! disjoint maps) are not errors; they are documented no-ops.

use crate::geometry::{Extent, Size};
use crate::kind::{DomainKind, MapKind, ValueType};
use std::error::Error;
use std::fmt;

/// Errors from extent arithmetic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExtentError {
    /// Two boxes that were required to intersect do not.
    Disjoint {
        /// Left operand.
        a: Extent,
        /// Right operand.
        b: Extent,
    },
}

impl fmt::Display for ExtentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disjoint { a, b } => write!(f, "extents {a} and {b} do not overlap"),
        }
    }
}

impl Error for ExtentError {}

/// Errors from map construction and map-level operations.
#[derive(Clone, Debug, PartialEq)]
pub enum MapError {
    /// The value type cannot live in the requested domain.
    InvalidKind {
        /// Requested value type.
        value: ValueType,
        /// Requested domain.
        domain: DomainKind,
    },
    /// The operation is not defined for this kind of map.
    Unsupported {
        /// Operation name.
        operation: &'static str,
        /// Kind of the map it was attempted on.
        kind: MapKind,
    },
    /// A pixel sampling matrix has no inverse.
    SingularSampling,
    /// A raw buffer does not match the map's physical size.
    SizeMismatch {
        /// Expected physical size.
        expected: Size,
        /// Number of elements supplied.
        actual: usize,
    },
    /// A map descriptor failed validation.
    InvalidDescriptor {
        /// Description of the validation failure.
        reason: String,
    },
    /// An extent operation failed.
    Extent(ExtentError),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidKind { value, domain } => {
                write!(f, "{value} values cannot be stored in the {domain} domain")
            }
            Self::Unsupported { operation, kind } => {
                write!(f, "{operation} is not supported on {kind} maps")
            }
            Self::SingularSampling => write!(f, "pixel sampling matrix is singular"),
            Self::SizeMismatch { expected, actual } => write!(
                f,
                "buffer of {actual} elements does not match physical size {expected}"
            ),
            Self::InvalidDescriptor { reason } => write!(f, "invalid map descriptor: {reason}"),
            Self::Extent(e) => write!(f, "extent: {e}"),
        }
    }
}

impl Error for MapError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Extent(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ExtentError> for MapError {
    fn from(e: ExtentError) -> Self {
        Self::Extent(e)
    }
}
