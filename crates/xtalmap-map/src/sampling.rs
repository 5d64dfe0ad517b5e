//! Pixel sampling: the linear maps between lattice indices and physical
//! coordinates in real and reciprocal space.

use nalgebra::{Matrix3, Vector3};
use xtalmap_core::{MapError, Size};

/// Real-space and reciprocal-space sampling matrices of a grid.
///
/// The spatial matrix `S` maps a pixel offset to a physical offset. For a
/// grid of `N` samples per axis the frequency matrix is
/// `F = (S · diag(N))^-T`, so that one frequency step corresponds to one
/// period across the whole grid. Both matrices and their inverses are
/// kept in sync; setting either one recomputes the other.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelSampling {
    size: Size,
    spatial: Matrix3<f64>,
    spatial_inv: Matrix3<f64>,
    frequency: Matrix3<f64>,
    frequency_inv: Matrix3<f64>,
}

// The determinant is compared against the cube of the largest entry, so
// the test does not depend on the length unit.
fn invert(m: &Matrix3<f64>) -> Result<Matrix3<f64>, MapError> {
    let scale = m.amax();
    if !scale.is_finite() || scale == 0.0 {
        return Err(MapError::SingularSampling);
    }
    let det = m.determinant();
    if !det.is_finite() || (det / scale.powi(3)).abs() < 1e-12 {
        return Err(MapError::SingularSampling);
    }
    let inv = m.try_inverse().ok_or(MapError::SingularSampling)?;
    if inv.iter().all(|v| v.is_finite()) {
        Ok(inv)
    } else {
        Err(MapError::SingularSampling)
    }
}

fn size_diagonal(size: Size) -> Matrix3<f64> {
    Matrix3::from_diagonal(&Vector3::new(
        f64::from(size.width.max(1)),
        f64::from(size.height.max(1)),
        f64::from(size.depth.max(1)),
    ))
}

impl PixelSampling {
    /// Unit spacing for a grid of `size` samples.
    pub fn new(size: Size) -> Self {
        let n = size_diagonal(size);
        let frequency = Matrix3::from_diagonal(&Vector3::new(
            1.0 / n[(0, 0)],
            1.0 / n[(1, 1)],
            1.0 / n[(2, 2)],
        ));
        Self {
            size,
            spatial: Matrix3::identity(),
            spatial_inv: Matrix3::identity(),
            frequency,
            frequency_inv: n,
        }
    }

    /// Sampling with the given spatial matrix.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::SingularSampling`] if `spatial` has no inverse.
    pub fn with_spatial_scale(size: Size, spatial: Matrix3<f64>) -> Result<Self, MapError> {
        let mut s = Self::new(size);
        s.set_spatial_scale(spatial)?;
        Ok(s)
    }

    /// Grid size the frequency matrix was derived for.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Spatial matrix `S`.
    pub fn spatial_scale(&self) -> &Matrix3<f64> {
        &self.spatial
    }

    /// Frequency matrix `F`.
    pub fn frequency_scale(&self) -> &Matrix3<f64> {
        &self.frequency
    }

    /// Replace `S` and recompute `F`.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::SingularSampling`] if `spatial` has no inverse;
    /// the sampling is left unchanged.
    pub fn set_spatial_scale(&mut self, spatial: Matrix3<f64>) -> Result<(), MapError> {
        let spatial_inv = invert(&spatial)?;
        let frequency_inv = (spatial * size_diagonal(self.size)).transpose();
        let frequency = invert(&frequency_inv)?;
        self.spatial = spatial;
        self.spatial_inv = spatial_inv;
        self.frequency = frequency;
        self.frequency_inv = frequency_inv;
        Ok(())
    }

    /// Replace `F` and recompute `S = F^-T · diag(N)^-1`.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::SingularSampling`] if `frequency` has no
    /// inverse; the sampling is left unchanged.
    pub fn set_frequency_scale(&mut self, frequency: Matrix3<f64>) -> Result<(), MapError> {
        let frequency_inv = invert(&frequency)?;
        let n_inv = invert(&size_diagonal(self.size))?;
        let spatial = frequency_inv.transpose() * n_inv;
        let spatial_inv = invert(&spatial)?;
        self.spatial = spatial;
        self.spatial_inv = spatial_inv;
        self.frequency = frequency;
        self.frequency_inv = frequency_inv;
        Ok(())
    }

    /// `S · pixel`.
    pub fn spatial_to_physical(&self, pixel: &Vector3<f64>) -> Vector3<f64> {
        self.spatial * pixel
    }

    /// `S^-1 · physical`.
    pub fn physical_to_spatial(&self, physical: &Vector3<f64>) -> Vector3<f64> {
        self.spatial_inv * physical
    }

    /// `F · pixel`.
    pub fn frequency_to_physical(&self, pixel: &Vector3<f64>) -> Vector3<f64> {
        self.frequency * pixel
    }

    /// `F^-1 · physical`.
    pub fn physical_to_frequency(&self, physical: &Vector3<f64>) -> Vector3<f64> {
        self.frequency_inv * physical
    }
}
