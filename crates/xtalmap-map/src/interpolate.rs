//! Linear, bilinear and trilinear interpolation in pixel coordinates.
//!
//! Neighbour lookups go through the boundary-checked accessors, so taps
//! outside the map contribute zero. Taps with zero weight are dropped,
//! which makes interpolation at an exact grid point return the stored
//! value bit for bit.

use crate::domain::Stores;
use crate::state::MapState;
use crate::value::{Complex32, MapValue};
use nalgebra::Vector3;
use smallvec::SmallVec;
use xtalmap_core::Point;

/// Interpolation taps: lattice points and their weights.
pub type Taps = SmallVec<[(Point, f64); 8]>;

// Taps that fall outside the i32 lattice are dropped; they would read zero.
fn axis_taps(v: f64) -> SmallVec<[(i32, f64); 2]> {
    let base = v.floor();
    let frac = v - base;
    let i = base as i64;
    let mut taps = SmallVec::new();
    if frac < 1.0 {
        if let Ok(i) = i32::try_from(i) {
            taps.push((i, 1.0 - frac));
        }
    }
    if frac > 0.0 {
        if let Ok(i) = i32::try_from(i.saturating_add(1)) {
            taps.push((i, frac));
        }
    }
    taps
}

/// Two-tap weights along x at `y = z = 0`.
pub fn linear_weights(x: f64) -> Taps {
    axis_taps(x)
        .into_iter()
        .map(|(i, w)| (Point::new(i, 0, 0), w))
        .collect()
}

/// Four-tap weights in the `z = 0` plane.
pub fn bilinear_weights(x: f64, y: f64) -> Taps {
    let xs = axis_taps(x);
    let mut taps = Taps::new();
    for (j, wy) in axis_taps(y) {
        for &(i, wx) in &xs {
            taps.push((Point::new(i, j, 0), wx * wy));
        }
    }
    taps
}

/// Eight-tap weights around `pixel`.
pub fn trilinear_weights(pixel: &Vector3<f64>) -> Taps {
    let xs = axis_taps(pixel.x);
    let ys = axis_taps(pixel.y);
    let mut taps = Taps::new();
    for (k, wz) in axis_taps(pixel.z) {
        for &(j, wy) in &ys {
            for &(i, wx) in &xs {
                taps.push((Point::new(i, j, k), wx * wy * wz));
            }
        }
    }
    taps
}

fn blend_real<T: MapValue, D: Stores<T>>(map: &MapState<T, D>, taps: &Taps) -> f32 {
    if let [(p, w)] = taps.as_slice() {
        if *w == 1.0 {
            return map.get_real(*p);
        }
    }
    taps.iter()
        .map(|&(p, w)| f64::from(map.get_real(p)) * w)
        .sum::<f64>() as f32
}

fn blend_complex<T: MapValue, D: Stores<T>>(map: &MapState<T, D>, taps: &Taps) -> Complex32 {
    if let [(p, w)] = taps.as_slice() {
        if *w == 1.0 {
            return map.get_complex(*p);
        }
    }
    let (re, im) = taps.iter().fold((0.0f64, 0.0f64), |(re, im), &(p, w)| {
        let v = map.get_complex(p);
        (re + f64::from(v.re) * w, im + f64::from(v.im) * w)
    });
    Complex32::new(re as f32, im as f32)
}

impl<T: MapValue, D: Stores<T>> MapState<T, D> {
    /// Trilinear interpolation of the real part at a pixel position.
    pub fn interpolate_real(&self, pixel: &Vector3<f64>) -> f32 {
        blend_real(self, &trilinear_weights(pixel))
    }

    /// Bilinear interpolation of the real part in the `z = 0` plane.
    pub fn interpolate_real_2d(&self, x: f64, y: f64) -> f32 {
        blend_real(self, &bilinear_weights(x, y))
    }

    /// Linear interpolation of the real part along the `y = z = 0` row.
    pub fn interpolate_real_1d(&self, x: f64) -> f32 {
        blend_real(self, &linear_weights(x))
    }

    /// Trilinear interpolation of the complex value at a pixel position.
    pub fn interpolate_complex(&self, pixel: &Vector3<f64>) -> Complex32 {
        blend_complex(self, &trilinear_weights(pixel))
    }

    /// Bilinear interpolation of the complex value in the `z = 0` plane.
    pub fn interpolate_complex_2d(&self, x: f64, y: f64) -> Complex32 {
        blend_complex(self, &bilinear_weights(x, y))
    }

    /// Linear interpolation of the complex value along the `y = z = 0` row.
    pub fn interpolate_complex_1d(&self, x: f64) -> Complex32 {
        blend_complex(self, &linear_weights(x))
    }
}
