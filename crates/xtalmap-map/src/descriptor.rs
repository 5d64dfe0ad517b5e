//! Map construction input and its validation.

use crate::sampling::PixelSampling;
use nalgebra::{Matrix3, Vector3};
use tracing::warn;
use xtalmap_core::{Extent, MapError, MapKind};

/// Everything needed to construct a map.
///
/// Passed to [`AnyMap::from_descriptor`](crate::AnyMap::from_descriptor),
/// which calls [`validate()`](MapDescriptor::validate) first.
#[derive(Clone, Debug, PartialEq)]
pub struct MapDescriptor {
    /// Value type and domain.
    pub kind: MapKind,
    /// Extent for spatial maps; only the size is used for spectra.
    pub extent: Extent,
    /// Spatial sampling matrix. `None` = unit spacing.
    pub spacing: Option<Matrix3<f64>>,
    /// Physical position of pixel `(0, 0, 0)`.
    pub origin: Vector3<f64>,
}

impl MapDescriptor {
    /// A unit-spaced descriptor at the physical origin.
    pub fn new(kind: MapKind, extent: Extent) -> Self {
        Self {
            kind,
            extent,
            spacing: None,
            origin: Vector3::zeros(),
        }
    }

    /// Validate all structural invariants.
    ///
    /// # Errors
    ///
    /// - [`MapError::SingularSampling`] if `spacing` has no inverse.
    /// - [`MapError::InvalidDescriptor`] if the origin or spacing holds a
    ///   non-finite component.
    pub fn validate(&self) -> Result<(), MapError> {
        if self.origin.iter().any(|v| !v.is_finite()) {
            return Err(MapError::InvalidDescriptor {
                reason: format!("origin must be finite, got {:?}", self.origin.as_slice()),
            });
        }
        if let Some(spacing) = &self.spacing {
            if spacing.iter().any(|v| !v.is_finite()) {
                return Err(MapError::InvalidDescriptor {
                    reason: "spacing matrix holds a non-finite entry".to_string(),
                });
            }
            if let Err(e) = PixelSampling::with_spatial_scale(self.extent.size(), *spacing) {
                warn!(kind = %self.kind, extent = %self.extent, "rejected singular spacing matrix");
                return Err(e);
            }
        }
        Ok(())
    }
}
