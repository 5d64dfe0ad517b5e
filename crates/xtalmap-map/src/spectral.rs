//! Seam between real-space maps and their packed spectra.
//!
//! The numeric transform is supplied by the caller through
//! [`SpectralTransform`]; this module only handles layout, Hermitian
//! completion and the phase correction for maps whose first sample is not
//! at the coordinate origin.

use crate::domain::{HalfFrequency, Spatial};
use crate::state::MapState;
use crate::value::Complex32;
use xtalmap_core::{Extent, Index, MapError, Point, Size};

/// A real-to-complex discrete Fourier transform over a 3-D grid.
///
/// Both buffers are x-fastest. The spectrum is packed to
/// `(Nx, Ny, Nz/2 + 1)` with negative x/y frequencies wrapped to the top
/// of their axes. `inverse(forward(x))` must reproduce `x`, so the
/// inverse carries the `1/N` normalisation.
pub trait SpectralTransform {
    /// `input.len() == size.volume()`, `output` is the packed spectrum.
    fn forward(&mut self, size: Size, input: &[f32], output: &mut [Complex32]);

    /// `input` is a Hermitian-complete packed spectrum,
    /// `output.len() == size.volume()`.
    fn inverse(&mut self, size: Size, input: &[Complex32], output: &mut [f32]);
}

/// The packed storage of `map` made Hermitian on every plane that holds
/// both members of a conjugate pair.
///
/// Those are the `z = 0` plane and, for even depth, the `z = N/2` plane.
/// Within them the cell earlier in storage order keeps its value and its
/// partner at `(-x, -y)` (wrapped) is overwritten with the conjugate.
/// Cells that are their own partner are left as stored.
pub fn hermitian_buffer(map: &MapState<Complex32, HalfFrequency>) -> Vec<Complex32> {
    let storage = map.storage();
    let size = map.logical_size();
    let (w, h, d) = (size.width as usize, size.height as usize, size.depth as usize);
    let paired = |z: usize| z == 0 || (d % 2 == 0 && z == d / 2);
    (0..storage.len())
        .map(|offset| {
            let i = storage.index_of(offset);
            if !paired(i.z) {
                return storage.get(i);
            }
            let partner = Index::new((w - i.x) % w, (h - i.y) % h, i.z);
            if (partner.y, partner.x) < (i.y, i.x) {
                storage.get(partner).conj()
            } else {
                storage.get(i)
            }
        })
        .collect()
}

/// Transform a real spatial map into its packed spectrum.
///
/// The result is phase-corrected so that frequencies refer to the
/// coordinate origin rather than to the map's first sample.
pub fn to_half_frequency<S: SpectralTransform + ?Sized>(
    map: &MapState<f32, Spatial>,
    transform: &mut S,
) -> MapState<Complex32, HalfFrequency> {
    let extent = map.extent();
    let size = extent.size();
    let mut spectrum = MapState::<Complex32, HalfFrequency>::new(Extent::at_origin(size));
    transform.forward(size, map.storage().as_slice(), spectrum.storage_mut().as_mut_slice());
    spectrum.set_sampling(map.sampling().clone());
    spectrum.set_origin(map.origin());
    spectrum.adjust_phase_origin(extent.start());
    spectrum
}

/// Transform a packed spectrum back into a real spatial map whose first
/// sample is at `start`.
///
/// # Errors
///
/// Returns [`MapError::SizeMismatch`] if the transform's output cannot
/// back a map of the spectrum's logical size.
pub fn to_spatial<S: SpectralTransform + ?Sized>(
    spectrum: &MapState<Complex32, HalfFrequency>,
    start: Point,
    transform: &mut S,
) -> Result<MapState<f32, Spatial>, MapError> {
    let size = spectrum.logical_size();
    let mut shifted = spectrum.clone();
    shifted.adjust_phase_origin(-start);
    let input = hermitian_buffer(&shifted);
    let mut output = vec![0.0f32; size.volume()];
    transform.inverse(size, &input, &mut output);
    let mut map = MapState::from_vec(Extent::from_size(start, size), output)?;
    map.set_sampling(spectrum.sampling().clone());
    map.set_origin(spectrum.origin());
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Every stored cell gets a distinct value.
    fn numbered(size: Size) -> MapState<Complex32, HalfFrequency> {
        let mut m = MapState::new(Extent::at_origin(size));
        for (offset, v) in m.storage_mut().as_mut_slice().iter_mut().enumerate() {
            *v = Complex32::new(offset as f32, 1.0 + offset as f32);
        }
        m
    }

    #[test]
    fn nyquist_z_plane_is_completed() {
        let (w, h) = (4usize, 3usize);
        let m = numbered(Size::new(4, 3, 4));
        assert_eq!(m.physical_size(), Size::new(4, 3, 3));
        let buf = hermitian_buffer(&m);
        let at = |x: usize, y: usize, z: usize| buf[x + w * (y + h * z)];

        for z in [0, 2] {
            for y in 0..h {
                for x in 0..w {
                    let (px, py) = ((w - x) % w, (h - y) % h);
                    if (px, py) != (x, y) {
                        assert_eq!(at(x, y, z), at(px, py, z).conj(), "({x}, {y}, {z})");
                    }
                }
            }
        }
        // The first cell of each pair keeps its stored value.
        assert_eq!(at(1, 0, 2), m.storage().get(Index::new(1, 0, 2)));
        assert_eq!(at(3, 0, 2), m.storage().get(Index::new(1, 0, 2)).conj());
        // The interior plane is copied as stored.
        assert_eq!(&buf[w * h..2 * w * h], &m.storage().as_slice()[w * h..2 * w * h]);
    }

    #[test]
    fn odd_depth_has_no_nyquist_plane() {
        let m = numbered(Size::new(2, 2, 3));
        let buf = hermitian_buffer(&m);
        assert_eq!(&buf[4..], &m.storage().as_slice()[4..]);
    }

    #[test]
    fn negative_nyquist_z_folds_through_the_opposite_corner() {
        let mut m = MapState::<Complex32, HalfFrequency>::new(Extent::at_origin(Size::cube(4)));
        let v = Complex32::new(3.0, 4.0);
        assert!(m.set_complex(Point::new(-1, 1, 2), v));
        assert_eq!(m.get_complex(Point::new(1, -1, -2)), v.conj());
        // (-1, 1, -2) is a different stored cell.
        assert_eq!(m.get_complex(Point::new(-1, 1, -2)), Complex32::new(0.0, 0.0));
    }
}
