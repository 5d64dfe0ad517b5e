//! [`AnyMap`]: runtime-typed maps over the closed set of six kinds.
//!
//! Unary operations resolve the concrete state with one exhaustive match.
//! Binary operations resolve the left operand and then the right one, so
//! every (value, domain) × (value, domain) pairing gets its own
//! monomorphised body.

use crate::descriptor::MapDescriptor;
use crate::domain::{Frequency, HalfFrequency, Spatial};
use crate::ops::{CompoundOp, MapFunction};
use crate::sampling::PixelSampling;
use crate::state::{MapState, MapStats};
use crate::value::Complex32;
use nalgebra::Vector3;
use xtalmap_core::{DomainKind, Extent, MapError, MapKind, Point, Size, ValueType};

/// A map of any valid kind.
#[derive(Clone, Debug, PartialEq)]
pub enum AnyMap {
    /// `f32` over real space.
    RealSpatial(MapState<f32, Spatial>),
    /// Complex over real space.
    ComplexSpatial(MapState<Complex32, Spatial>),
    /// `u8` over real space.
    ByteSpatial(MapState<u8, Spatial>),
    /// `f32` over the full frequency grid.
    RealFrequency(MapState<f32, Frequency>),
    /// Complex over the full frequency grid.
    ComplexFrequency(MapState<Complex32, Frequency>),
    /// Packed Hermitian spectrum.
    ComplexHalfFrequency(MapState<Complex32, HalfFrequency>),
}

macro_rules! dispatch {
    ($map:expr, $m:ident => $body:expr) => {
        match $map {
            AnyMap::RealSpatial($m) => $body,
            AnyMap::ComplexSpatial($m) => $body,
            AnyMap::ByteSpatial($m) => $body,
            AnyMap::RealFrequency($m) => $body,
            AnyMap::ComplexFrequency($m) => $body,
            AnyMap::ComplexHalfFrequency($m) => $body,
        }
    };
}

macro_rules! dispatch2 {
    ($a:expr, $b:expr, $x:ident, $y:ident => $body:expr) => {
        dispatch!($a, $x => dispatch!($b, $y => $body))
    };
}

macro_rules! from_state {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for AnyMap {
                fn from(m: $ty) -> Self {
                    Self::$variant(m)
                }
            }
        )*
    };
}

from_state! {
    RealSpatial => MapState<f32, Spatial>,
    ComplexSpatial => MapState<Complex32, Spatial>,
    ByteSpatial => MapState<u8, Spatial>,
    RealFrequency => MapState<f32, Frequency>,
    ComplexFrequency => MapState<Complex32, Frequency>,
    ComplexHalfFrequency => MapState<Complex32, HalfFrequency>,
}

impl AnyMap {
    /// Zero-filled map of `kind` covering `extent`.
    pub fn new(kind: MapKind, extent: Extent) -> Self {
        match (kind.value_type(), kind.domain()) {
            (ValueType::Real, DomainKind::Spatial) => Self::RealSpatial(MapState::new(extent)),
            (ValueType::Complex, DomainKind::Spatial) => {
                Self::ComplexSpatial(MapState::new(extent))
            }
            (ValueType::Byte, DomainKind::Spatial) => Self::ByteSpatial(MapState::new(extent)),
            (ValueType::Real, DomainKind::Frequency) => {
                Self::RealFrequency(MapState::new(extent))
            }
            (ValueType::Complex, DomainKind::Frequency) => {
                Self::ComplexFrequency(MapState::new(extent))
            }
            // MapKind guarantees the remaining pairs are complex half-frequency.
            _ => Self::ComplexHalfFrequency(MapState::new(extent)),
        }
    }

    /// Build a map from a descriptor.
    ///
    /// # Errors
    ///
    /// Propagates [`MapDescriptor::validate`] failures.
    pub fn from_descriptor(desc: &MapDescriptor) -> Result<Self, MapError> {
        desc.validate()?;
        let mut map = Self::new(desc.kind, desc.extent);
        let size = map.extent().size();
        let sampling = match desc.spacing {
            Some(s) => PixelSampling::with_spatial_scale(size, s)?,
            None => PixelSampling::new(size),
        };
        map.set_sampling(sampling);
        map.set_origin(desc.origin);
        Ok(map)
    }

    /// The (value type, domain) identity.
    pub fn kind(&self) -> MapKind {
        dispatch!(self, m => m.kind())
    }

    /// Logical extent.
    pub fn extent(&self) -> Extent {
        dispatch!(self, m => m.extent())
    }

    /// Physical storage shape.
    pub fn physical_size(&self) -> Size {
        dispatch!(self, m => m.physical_size())
    }

    /// Whether `p` is addressable.
    pub fn contains(&self, p: Point) -> bool {
        dispatch!(self, m => m.contains(p))
    }

    /// Real part at `p`.
    pub fn get_real(&self, p: Point) -> f32 {
        dispatch!(self, m => m.get_real(p))
    }

    /// Complex value at `p`.
    pub fn get_complex(&self, p: Point) -> Complex32 {
        dispatch!(self, m => m.get_complex(p))
    }

    /// Store a real value at `p`. Returns `false` if the write was dropped.
    pub fn set_real(&mut self, p: Point, v: f32) -> bool {
        dispatch!(self, m => m.set_real(p, v))
    }

    /// Store a complex value at `p`. Returns `false` if the write was
    /// dropped.
    pub fn set_complex(&mut self, p: Point, v: Complex32) -> bool {
        dispatch!(self, m => m.set_complex(p, v))
    }

    /// Trilinear interpolation of the real part.
    pub fn interpolate_real(&self, pixel: &Vector3<f64>) -> f32 {
        dispatch!(self, m => m.interpolate_real(pixel))
    }

    /// Bilinear interpolation of the real part in the `z = 0` plane.
    pub fn interpolate_real_2d(&self, x: f64, y: f64) -> f32 {
        dispatch!(self, m => m.interpolate_real_2d(x, y))
    }

    /// Linear interpolation of the real part along x.
    pub fn interpolate_real_1d(&self, x: f64) -> f32 {
        dispatch!(self, m => m.interpolate_real_1d(x))
    }

    /// Trilinear interpolation of the complex value.
    pub fn interpolate_complex(&self, pixel: &Vector3<f64>) -> Complex32 {
        dispatch!(self, m => m.interpolate_complex(pixel))
    }

    /// Bilinear interpolation of the complex value in the `z = 0` plane.
    pub fn interpolate_complex_2d(&self, x: f64, y: f64) -> Complex32 {
        dispatch!(self, m => m.interpolate_complex_2d(x, y))
    }

    /// Linear interpolation of the complex value along x.
    pub fn interpolate_complex_1d(&self, x: f64) -> Complex32 {
        dispatch!(self, m => m.interpolate_complex_1d(x))
    }

    /// Summary statistics.
    pub fn stats(&self) -> MapStats {
        dispatch!(self, m => m.stats())
    }

    /// A zero-filled map of the same kind, extent and sampling.
    #[must_use]
    pub fn copy_empty(&self) -> Self {
        dispatch!(self, m => Self::from(m.copy_empty()))
    }

    /// Pixel sampling.
    pub fn sampling(&self) -> &PixelSampling {
        dispatch!(self, m => m.sampling())
    }

    /// Replace the pixel sampling.
    pub fn set_sampling(&mut self, sampling: PixelSampling) {
        dispatch!(self, m => m.set_sampling(sampling))
    }

    /// Spatial origin.
    pub fn origin(&self) -> Vector3<f64> {
        dispatch!(self, m => m.origin())
    }

    /// Move the spatial origin.
    pub fn set_origin(&mut self, origin: Vector3<f64>) {
        dispatch!(self, m => m.set_origin(origin))
    }

    /// Physical coordinate of `p`.
    pub fn physical_coordinate(&self, p: Point) -> Vector3<f64> {
        dispatch!(self, m => m.physical_coordinate(p))
    }

    /// Pixel position of a physical coordinate.
    pub fn pixel_coordinate(&self, physical: &Vector3<f64>) -> Vector3<f64> {
        dispatch!(self, m => m.pixel_coordinate(physical))
    }

    /// Every canonical point of the map, in storage order.
    pub fn points(&self) -> Vec<Point> {
        dispatch!(self, m => m.cells().map(|(p, _)| p).collect())
    }

    /// Combine every canonical cell with a scalar.
    pub fn apply_scalar(&mut self, op: CompoundOp, v: Complex32) {
        dispatch!(self, m => m.apply_scalar(op, v))
    }

    /// Combine with another map over the overlap of the logical extents.
    /// Returns the overlap, or `None` if the maps are disjoint.
    pub fn apply_map(&mut self, op: CompoundOp, other: &AnyMap) -> Option<Extent> {
        dispatch2!(self, other, a, b => a.apply_map(op, b))
    }

    /// Combine with `f` sampled at physical coordinates.
    pub fn apply_function<F: MapFunction + ?Sized>(&mut self, op: CompoundOp, f: &F) {
        dispatch!(self, m => m.apply_function(op, f))
    }

    /// Copy the overlap of `src` into this map, converting value types.
    /// Returns the overlap, or `None` if the maps are disjoint.
    pub fn paste(&mut self, src: &AnyMap) -> Option<Extent> {
        if let AnyMap::ComplexHalfFrequency(half) = src {
            return dispatch!(self, dst => dst.paste_from_half_frequency(half));
        }
        dispatch2!(self, src, dst, s => dst.paste_from(s))
    }

    /// A new spatial map of the same value type covering `extent`, filled
    /// with whatever part of this map overlaps it.
    #[must_use]
    pub fn extract(&self, extent: Extent) -> AnyMap {
        let mut out = AnyMap::new(self.kind().to_spatial(), extent);
        if let Ok(sampling) =
            PixelSampling::with_spatial_scale(extent.size(), *self.sampling().spatial_scale())
        {
            out.set_sampling(sampling);
        }
        out.set_origin(self.origin());
        out.paste(self);
        out
    }

    /// Shift the phase reference of a complex spectrum; see
    /// [`MapState::adjust_phase_origin`].
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Unsupported`] for maps that are not complex
    /// spectra.
    pub fn adjust_phase_origin(&mut self, shift: Point) -> Result<(), MapError> {
        match self {
            Self::ComplexFrequency(m) => m.adjust_phase_origin(shift),
            Self::ComplexHalfFrequency(m) => m.adjust_phase_origin(shift),
            other => {
                return Err(MapError::Unsupported {
                    operation: "adjust_phase_origin",
                    kind: other.kind(),
                })
            }
        }
        Ok(())
    }

    /// The real spatial state, if this is one.
    pub fn as_real_spatial(&self) -> Option<&MapState<f32, Spatial>> {
        match self {
            Self::RealSpatial(m) => Some(m),
            _ => None,
        }
    }

    /// The real spatial state, mutably, if this is one.
    pub fn as_real_spatial_mut(&mut self) -> Option<&mut MapState<f32, Spatial>> {
        match self {
            Self::RealSpatial(m) => Some(m),
            _ => None,
        }
    }

    /// The packed spectrum, if this is one.
    pub fn as_half_frequency(&self) -> Option<&MapState<Complex32, HalfFrequency>> {
        match self {
            Self::ComplexHalfFrequency(m) => Some(m),
            _ => None,
        }
    }
}
