//! Typed density maps for xtalmap.
//!
//! This crate defines [`MapState`], a fixed-shape map of one value type
//! over one coordinate domain, and [`AnyMap`], the closed runtime enum of
//! the six valid (value, domain) identities.
//!
//! # Domains
//!
//! - [`Spatial`]: real space over an arbitrary extent
//! - [`Frequency`]: full reciprocal space centred on the origin
//! - [`HalfFrequency`]: packed Hermitian spectrum of a real map
//!
//! # Operations
//!
//! Boundary-checked point access, trilinear/bilinear/linear
//! interpolation, compound arithmetic against scalars, maps and
//! functions ([`CompoundOp`]), pasting between any two kinds, pixel
//! sampling ([`PixelSampling`]) and a seam for caller-supplied spectral
//! transforms ([`SpectralTransform`]).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod any;
pub mod descriptor;
pub mod domain;
pub mod interpolate;
pub mod ops;
pub mod sampling;
pub mod spectral;
pub mod state;
pub mod storage;
pub mod value;

#[cfg(test)]
pub(crate) mod compliance;

pub use any::AnyMap;
pub use descriptor::MapDescriptor;
pub use domain::{conj_point, Domain, Frequency, HalfFrequency, Location, Spatial, Spectral, Stores};
pub use interpolate::{bilinear_weights, linear_weights, trilinear_weights, Taps};
pub use ops::{CompoundOp, MapFunction};
pub use sampling::PixelSampling;
pub use spectral::{hermitian_buffer, to_half_frequency, to_spatial, SpectralTransform};
pub use state::{MapState, MapStats};
pub use storage::ValueStorage;
pub use value::{Complex32, MapValue};
