//! [`MapState`]: a typed, fixed-shape map over one domain.

use crate::domain::{conj_point, Domain, HalfFrequency, Stores};
use crate::sampling::PixelSampling;
use crate::storage::ValueStorage;
use crate::value::{Complex32, MapValue};
use nalgebra::Vector3;
use xtalmap_core::{DomainKind, Extent, MapError, MapKind, Point, Size};

/// Summary statistics over the real parts of a map's stored cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapStats {
    /// Smallest value.
    pub min: f32,
    /// Largest value.
    pub max: f32,
    /// Arithmetic mean.
    pub mean: f64,
    /// Root mean square.
    pub rms: f64,
}

/// A map of `T` values over domain `D`.
///
/// The extent, domain and value type are fixed at construction; a map is
/// never reshaped in place. Out-of-extent reads return zero and
/// out-of-extent writes are ignored, as are writes to the redundant half
/// of a packed spectrum.
#[derive(Clone, Debug, PartialEq)]
pub struct MapState<T: MapValue, D: Domain> {
    domain: D,
    storage: ValueStorage<T>,
    sampling: PixelSampling,
    origin: Vector3<f64>,
}

impl<T: MapValue, D: Stores<T>> MapState<T, D> {
    /// Zero-filled map covering `extent` with unit sampling.
    pub fn new(extent: Extent) -> Self {
        let domain = D::from_extent(extent);
        let storage = ValueStorage::new(domain.physical_size());
        let sampling = PixelSampling::new(domain.logical_extent().size());
        Self {
            domain,
            storage,
            sampling,
            origin: Vector3::zeros(),
        }
    }

    /// Map covering `extent` backed by an existing physical buffer.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::SizeMismatch`] if `data` does not match the
    /// domain's physical size.
    pub fn from_vec(extent: Extent, data: Vec<T>) -> Result<Self, MapError> {
        let mut map = Self::new(extent);
        map.storage = ValueStorage::from_vec(map.domain.physical_size(), data)?;
        Ok(map)
    }

    /// A zero-filled map with the same extent, sampling and origin.
    #[must_use]
    pub fn copy_empty(&self) -> Self {
        Self {
            domain: self.domain.clone(),
            storage: ValueStorage::new(self.storage.size()),
            sampling: self.sampling.clone(),
            origin: self.origin,
        }
    }

    /// The (value type, domain) identity.
    pub fn kind(&self) -> MapKind {
        D::MAP_KIND
    }

    /// The domain policy.
    pub fn domain(&self) -> &D {
        &self.domain
    }

    /// Logical extent.
    pub fn extent(&self) -> Extent {
        self.domain.logical_extent()
    }

    /// Shape of the physical storage.
    pub fn physical_size(&self) -> Size {
        self.storage.size()
    }

    /// Backing storage.
    pub fn storage(&self) -> &ValueStorage<T> {
        &self.storage
    }

    /// Backing storage, mutably.
    pub fn storage_mut(&mut self) -> &mut ValueStorage<T> {
        &mut self.storage
    }

    /// Pixel sampling.
    pub fn sampling(&self) -> &PixelSampling {
        &self.sampling
    }

    /// Replace the pixel sampling.
    pub fn set_sampling(&mut self, sampling: PixelSampling) {
        self.sampling = sampling;
    }

    /// Physical position of the spatial pixel `(0, 0, 0)`.
    pub fn origin(&self) -> Vector3<f64> {
        self.origin
    }

    /// Move the spatial origin.
    pub fn set_origin(&mut self, origin: Vector3<f64>) {
        self.origin = origin;
    }

    /// Whether `p` is addressable.
    pub fn contains(&self, p: Point) -> bool {
        self.domain.contains(p)
    }

    /// Value at `p` in this map's own type, folded through Hermitian
    /// symmetry where needed; zero outside the map.
    pub fn get(&self, p: Point) -> T {
        match self.domain.locate(p) {
            Some(loc) if loc.conjugate => self.storage.get(loc.index).conj(),
            Some(loc) => self.storage.get(loc.index),
            None => T::default(),
        }
    }

    /// Store `v` at `p`. Returns `false` if the write was dropped.
    pub fn set(&mut self, p: Point, v: T) -> bool {
        match self.domain.writable(p) {
            Some(i) => {
                *self.storage.get_mut(i) = v;
                true
            }
            None => false,
        }
    }

    /// Real part of the value at `p`; zero outside the map.
    pub fn get_real(&self, p: Point) -> f32 {
        self.domain
            .locate(p)
            .map_or(0.0, |loc| self.storage.get(loc.index).to_real())
    }

    /// Complex value at `p`; zero outside the map.
    pub fn get_complex(&self, p: Point) -> Complex32 {
        self.get(p).to_complex()
    }

    /// Store a real value at `p`, narrowed to `T`.
    pub fn set_real(&mut self, p: Point, v: f32) -> bool {
        self.set(p, T::from_real(v))
    }

    /// Store a complex value at `p`, narrowed to `T`.
    pub fn set_complex(&mut self, p: Point, v: Complex32) -> bool {
        self.set(p, T::from_complex(v))
    }

    /// Stored value at `p` without containment checks or folding.
    ///
    /// `p` must be inside the map and, for packed spectra, on the stored
    /// half.
    #[inline]
    pub fn value(&self, p: Point) -> T {
        debug_assert!(self.contains(p), "{p} outside {}", self.extent());
        self.storage.get(self.domain.index_unchecked(p))
    }

    /// Mutable access to the stored value at `p`; see [`MapState::value`].
    #[inline]
    pub fn value_mut(&mut self, p: Point) -> &mut T {
        debug_assert!(self.contains(p), "{p} outside {}", self.extent());
        let i = self.domain.index_unchecked(p);
        self.storage.get_mut(i)
    }

    /// Set every stored cell to `v`.
    pub fn fill(&mut self, v: T) {
        self.storage.fill(v);
    }

    /// Every canonical stored cell with its logical point, in storage
    /// order. Redundant cells of a packed spectrum are skipped.
    pub fn cells(&self) -> impl Iterator<Item = (Point, T)> + '_ {
        self.storage
            .as_slice()
            .iter()
            .enumerate()
            .filter_map(move |(offset, v)| {
                let index = self.storage.index_of(offset);
                let p = self.domain.logical_point(index);
                (self.domain.writable(p) == Some(index)).then_some((p, *v))
            })
    }

    /// Apply `f` to every canonical stored cell.
    pub fn for_each_cell_mut(&mut self, mut f: impl FnMut(Point, &mut T)) {
        for offset in 0..self.storage.len() {
            let index = self.storage.index_of(offset);
            let p = self.domain.logical_point(index);
            if self.domain.writable(p) == Some(index) {
                f(p, self.storage.get_mut(index));
            }
        }
    }

    /// Physical coordinate of lattice point `p`.
    ///
    /// Spatial maps give `origin + S·p`; spectral maps give `F·p`.
    pub fn physical_coordinate(&self, p: Point) -> Vector3<f64> {
        let pixel = Vector3::new(f64::from(p.x), f64::from(p.y), f64::from(p.z));
        match D::KIND {
            DomainKind::Spatial => self.origin + self.sampling.spatial_to_physical(&pixel),
            DomainKind::Frequency | DomainKind::HalfFrequency => {
                self.sampling.frequency_to_physical(&pixel)
            }
        }
    }

    /// Fractional pixel position of a physical coordinate; the inverse of
    /// [`MapState::physical_coordinate`].
    pub fn pixel_coordinate(&self, physical: &Vector3<f64>) -> Vector3<f64> {
        match D::KIND {
            DomainKind::Spatial => self.sampling.physical_to_spatial(&(physical - self.origin)),
            DomainKind::Frequency | DomainKind::HalfFrequency => {
                self.sampling.physical_to_frequency(physical)
            }
        }
    }

    /// Min, max, mean and RMS of the real parts of all canonical cells.
    pub fn stats(&self) -> MapStats {
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        let mut sum = 0.0f64;
        let mut sum_sq = 0.0f64;
        let mut n = 0usize;
        for (_, v) in self.cells() {
            let r = v.to_real();
            min = min.min(r);
            max = max.max(r);
            sum += f64::from(r);
            sum_sq += f64::from(r) * f64::from(r);
            n += 1;
        }
        if n == 0 {
            return MapStats {
                min: 0.0,
                max: 0.0,
                mean: 0.0,
                rms: 0.0,
            };
        }
        MapStats {
            min,
            max,
            mean: sum / n as f64,
            rms: (sum_sq / n as f64).sqrt(),
        }
    }

    /// Copy the overlap of `src` into this map, converting value types.
    ///
    /// Returns the overlap, or `None` if the maps are disjoint.
    pub fn paste_from<T2: MapValue, D2: Stores<T2>>(
        &mut self,
        src: &MapState<T2, D2>,
    ) -> Option<Extent> {
        let overlap = self.extent().overlap(&src.extent()).ok()?;
        for p in overlap.points() {
            if let Some(i) = self.domain.writable(p) {
                *self.storage.get_mut(i) = T::from_complex(src.get_complex(p));
            }
        }
        Some(overlap)
    }

    /// [`MapState::paste_from`] specialised for a packed spectrum source:
    /// values are read straight from packed storage and conjugated where
    /// the requested point lies on the folded half.
    pub fn paste_from_half_frequency(
        &mut self,
        src: &MapState<Complex32, HalfFrequency>,
    ) -> Option<Extent> {
        let overlap = self.extent().overlap(&src.extent()).ok()?;
        for p in overlap.points() {
            let Some(i) = self.domain.writable(p) else {
                continue;
            };
            let cp = conj_point(p);
            let v = if cp == p {
                src.value(cp)
            } else {
                src.value(cp).conj()
            };
            *self.storage.get_mut(i) = T::from_complex(v);
        }
        Some(overlap)
    }
}

impl MapState<Complex32, HalfFrequency> {
    /// Logical (unpacked) size of the spectrum.
    pub fn logical_size(&self) -> Size {
        self.domain.logical_size()
    }
}
