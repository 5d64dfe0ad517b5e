//! Value-type and domain tags, and the closed set of valid [`MapKind`]s.

use crate::error::MapError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Element type stored in a map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    /// `f32` per cell.
    Real,
    /// `Complex<f32>` per cell.
    Complex,
    /// `u8` per cell (masks, labels, 8-bit images).
    Byte,
}

/// Coordinate domain a map lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DomainKind {
    /// Real space; points address an arbitrary extent directly.
    Spatial,
    /// Full reciprocal space centred on the origin.
    Frequency,
    /// Packed Hermitian reciprocal space (only `z >= 0` is stored).
    HalfFrequency,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real => write!(f, "real"),
            Self::Complex => write!(f, "complex"),
            Self::Byte => write!(f, "byte"),
        }
    }
}

impl fmt::Display for DomainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spatial => write!(f, "spatial"),
            Self::Frequency => write!(f, "frequency"),
            Self::HalfFrequency => write!(f, "half-frequency"),
        }
    }
}

/// A validated (value type, domain) pair.
///
/// Only six combinations exist; [`MapKind::new`] rejects the rest. Byte
/// maps are spatial only and the half-frequency domain holds complex
/// values only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MapKind {
    value: ValueType,
    domain: DomainKind,
}

impl MapKind {
    /// Real spatial density.
    pub const REAL_SPATIAL: Self = Self::unchecked(ValueType::Real, DomainKind::Spatial);
    /// Complex spatial map.
    pub const COMPLEX_SPATIAL: Self = Self::unchecked(ValueType::Complex, DomainKind::Spatial);
    /// 8-bit spatial map.
    pub const BYTE_SPATIAL: Self = Self::unchecked(ValueType::Byte, DomainKind::Spatial);
    /// Real values over the full frequency grid.
    pub const REAL_FREQUENCY: Self = Self::unchecked(ValueType::Real, DomainKind::Frequency);
    /// Complex values over the full frequency grid.
    pub const COMPLEX_FREQUENCY: Self =
        Self::unchecked(ValueType::Complex, DomainKind::Frequency);
    /// Packed Hermitian spectrum of a real map.
    pub const COMPLEX_HALF_FREQUENCY: Self =
        Self::unchecked(ValueType::Complex, DomainKind::HalfFrequency);

    /// Every valid kind, in dispatch order.
    pub const ALL: [Self; 6] = [
        Self::REAL_SPATIAL,
        Self::COMPLEX_SPATIAL,
        Self::BYTE_SPATIAL,
        Self::REAL_FREQUENCY,
        Self::COMPLEX_FREQUENCY,
        Self::COMPLEX_HALF_FREQUENCY,
    ];

    const fn unchecked(value: ValueType, domain: DomainKind) -> Self {
        Self { value, domain }
    }

    /// Validate a (value type, domain) pair.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidKind`] for byte maps outside the
    /// spatial domain and for real half-frequency maps.
    pub fn new(value: ValueType, domain: DomainKind) -> Result<Self, MapError> {
        match (value, domain) {
            (ValueType::Byte, DomainKind::Frequency | DomainKind::HalfFrequency)
            | (ValueType::Real, DomainKind::HalfFrequency) => {
                Err(MapError::InvalidKind { value, domain })
            }
            _ => Ok(Self::unchecked(value, domain)),
        }
    }

    /// The value type.
    pub fn value_type(&self) -> ValueType {
        self.value
    }

    /// The domain.
    pub fn domain(&self) -> DomainKind {
        self.domain
    }

    /// The same value type in the spatial domain (always valid).
    #[must_use]
    pub fn to_spatial(self) -> Self {
        Self::unchecked(self.value, DomainKind::Spatial)
    }
}

impl fmt::Display for MapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.domain)
    }
}
