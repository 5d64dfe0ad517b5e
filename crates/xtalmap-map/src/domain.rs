//! Domain policies: how a logical [`Point`] maps onto physical storage.
//!
//! Three policies exist:
//!
//! - [`Spatial`]: an arbitrary extent addressed directly.
//! - [`Frequency`]: a full spectrum centred on the origin, negative
//!   frequencies wrapped to the top of each axis.
//! - [`HalfFrequency`]: the Hermitian-packed spectrum of a real map. Only
//!   `z >= 0` is stored; the other half is reconstructed by conjugation.
//!
//! The [`Stores`] trait pins down which value types each domain may hold,
//! so an invalid `MapState<u8, Frequency>` does not type-check.

use crate::value::{Complex32, MapValue};
use std::fmt;
use xtalmap_core::{DomainKind, Extent, Index, MapKind, Point, Size};

/// Where a logical point lives in storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Location {
    /// Storage cell.
    pub index: Index,
    /// Whether the stored value must be conjugated to obtain the value at
    /// the requested point.
    pub conjugate: bool,
}

/// Point-to-index mapping for one coordinate domain.
pub trait Domain: Clone + fmt::Debug + Send + Sync + 'static {
    /// Runtime tag.
    const KIND: DomainKind;

    /// Build the policy for a map covering `extent`.
    ///
    /// Spectral domains only use the extent's size; their logical extent
    /// is always centred on the origin.
    fn from_extent(extent: Extent) -> Self;

    /// Points the map logically covers.
    fn logical_extent(&self) -> Extent;

    /// Shape of the storage buffer.
    fn physical_size(&self) -> Size;

    /// Whether `p` can be read from this map.
    fn contains(&self, p: Point) -> bool;

    /// Storage location of `p`, or `None` if outside the map.
    fn locate(&self, p: Point) -> Option<Location>;

    /// Storage cell a write to `p` lands in, or `None` if the write must
    /// be dropped.
    fn writable(&self, p: Point) -> Option<Index> {
        match self.locate(p) {
            Some(loc) if !loc.conjugate => Some(loc.index),
            _ => None,
        }
    }

    /// Storage cell of `p` without containment checks or folding.
    ///
    /// The caller must have established that `p` is inside the map and,
    /// for packed spectra, that `p` is on the stored half.
    fn index_unchecked(&self, p: Point) -> Index;

    /// The logical point stored at `index`.
    fn logical_point(&self, index: Index) -> Point;
}

/// Marker: domain `Self` may hold values of type `T`.
pub trait Stores<T: MapValue>: Domain {
    /// The (value, domain) identity of `MapState<T, Self>`.
    const MAP_KIND: MapKind;
}

/// Marker for reciprocal-space domains, whose logical points are signed
/// frequencies.
pub trait Spectral: Domain {}

impl Spectral for Frequency {}
impl Spectral for HalfFrequency {}

/// Wrap a signed frequency component onto `0..n`.
fn wrap_axis(v: i32, n: u32) -> usize {
    v.rem_euclid(n as i32) as usize
}

/// Undo [`wrap_axis`] for an axis whose logical range ends at `end`.
fn unwrap_axis(i: usize, n: u32, end: i32) -> i32 {
    let i = i as i32;
    if i <= end {
        i
    } else {
        i - n as i32
    }
}

// ── Spatial ────────────────────────────────────────────────────────

/// Real-space domain over an arbitrary extent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Spatial {
    extent: Extent,
}

impl Domain for Spatial {
    const KIND: DomainKind = DomainKind::Spatial;

    fn from_extent(extent: Extent) -> Self {
        Self { extent }
    }

    fn logical_extent(&self) -> Extent {
        self.extent
    }

    fn physical_size(&self) -> Size {
        self.extent.size()
    }

    fn contains(&self, p: Point) -> bool {
        self.extent.contains(p)
    }

    fn locate(&self, p: Point) -> Option<Location> {
        self.contains(p).then(|| Location {
            index: self.index_unchecked(p),
            conjugate: false,
        })
    }

    fn index_unchecked(&self, p: Point) -> Index {
        let rel = p - self.extent.start();
        Index::new(rel.x as usize, rel.y as usize, rel.z as usize)
    }

    fn logical_point(&self, index: Index) -> Point {
        self.extent.start() + Point::new(index.x as i32, index.y as i32, index.z as i32)
    }
}

impl Stores<f32> for Spatial {
    const MAP_KIND: MapKind = MapKind::REAL_SPATIAL;
}

impl Stores<Complex32> for Spatial {
    const MAP_KIND: MapKind = MapKind::COMPLEX_SPATIAL;
}

impl Stores<u8> for Spatial {
    const MAP_KIND: MapKind = MapKind::BYTE_SPATIAL;
}

// ── Frequency ──────────────────────────────────────────────────────

/// Full reciprocal-space domain.
///
/// Each axis of length `N` covers `[-(N/2), N - N/2 - 1]`; negative
/// components are stored at `N + p`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frequency {
    size: Size,
    extent: Extent,
}

impl Domain for Frequency {
    const KIND: DomainKind = DomainKind::Frequency;

    fn from_extent(extent: Extent) -> Self {
        let size = extent.size();
        let start = Point::new(
            -((size.width / 2) as i32),
            -((size.height / 2) as i32),
            -((size.depth / 2) as i32),
        );
        Self {
            size,
            extent: Extent::from_size(start, size),
        }
    }

    fn logical_extent(&self) -> Extent {
        self.extent
    }

    fn physical_size(&self) -> Size {
        self.size
    }

    fn contains(&self, p: Point) -> bool {
        self.extent.contains(p)
    }

    fn locate(&self, p: Point) -> Option<Location> {
        self.contains(p).then(|| Location {
            index: self.index_unchecked(p),
            conjugate: false,
        })
    }

    fn index_unchecked(&self, p: Point) -> Index {
        Index::new(
            wrap_axis(p.x, self.size.width),
            wrap_axis(p.y, self.size.height),
            wrap_axis(p.z, self.size.depth),
        )
    }

    fn logical_point(&self, index: Index) -> Point {
        let end = self.extent.end();
        Point::new(
            unwrap_axis(index.x, self.size.width, end.x),
            unwrap_axis(index.y, self.size.height, end.y),
            unwrap_axis(index.z, self.size.depth, end.z),
        )
    }
}

impl Stores<f32> for Frequency {
    const MAP_KIND: MapKind = MapKind::REAL_FREQUENCY;
}

impl Stores<Complex32> for Frequency {
    const MAP_KIND: MapKind = MapKind::COMPLEX_FREQUENCY;
}

// ── HalfFrequency ──────────────────────────────────────────────────

/// Canonical representative of `p` under Hermitian symmetry.
///
/// `p` is its own representative when `z > 0`, or `z == 0 && y > 0`, or
/// `z == 0 && y == 0 && x > 0`; otherwise the representative is `-p`.
/// The origin is a fixed point either way.
pub fn conj_point(p: Point) -> Point {
    if p.z > 0 || (p.z == 0 && p.y > 0) || (p.z == 0 && p.y == 0 && p.x > 0) {
        p
    } else {
        -p
    }
}

/// Packed Hermitian domain for spectra of real-valued maps.
///
/// The logical extent of an axis of length `N` is `[-(N/2 - 1), N/2]` for
/// even `N` and `[-(N-1)/2, (N-1)/2]` for odd `N`. A point is
/// addressable when `|p[i]| <= N[i]/2` on every axis, so `p` is
/// addressable exactly when `-p` is. On even x and y axes the two
/// Nyquist components share one cell. On an even z axis they do not:
/// `(x, y, -N/2)` folds to the conjugate of `(-x, -y, N/2)`, and every
/// cell of the `z = N/2` plane is writable, so that plane is only
/// Hermitian after [`hermitian_buffer`](crate::spectral::hermitian_buffer).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HalfFrequency {
    size: Size,
    extent: Extent,
}

impl HalfFrequency {
    /// Logical (unpacked) size of the spectrum.
    pub fn logical_size(&self) -> Size {
        self.size
    }
}

impl Domain for HalfFrequency {
    const KIND: DomainKind = DomainKind::HalfFrequency;

    fn from_extent(extent: Extent) -> Self {
        let size = extent.size();
        let axis = |n: u32| -> (i32, i32) {
            let n = n as i32;
            if n % 2 == 0 {
                (-(n / 2 - 1), n / 2)
            } else {
                (-(n - 1) / 2, (n - 1) / 2)
            }
        };
        let (sx, ex) = axis(size.width);
        let (sy, ey) = axis(size.height);
        let (sz, ez) = axis(size.depth);
        Self {
            size,
            extent: Extent::new(Point::new(sx, sy, sz), Point::new(ex, ey, ez)),
        }
    }

    fn logical_extent(&self) -> Extent {
        self.extent
    }

    fn physical_size(&self) -> Size {
        Size::new(self.size.width, self.size.height, self.size.depth / 2 + 1)
    }

    fn contains(&self, p: Point) -> bool {
        p.x.unsigned_abs() <= self.size.width / 2
            && p.y.unsigned_abs() <= self.size.height / 2
            && p.z.unsigned_abs() <= self.size.depth / 2
    }

    fn locate(&self, p: Point) -> Option<Location> {
        if !self.contains(p) {
            return None;
        }
        let cp = conj_point(p);
        Some(Location {
            index: self.index_unchecked(cp),
            conjugate: cp != p,
        })
    }

    fn index_unchecked(&self, p: Point) -> Index {
        debug_assert!(p.z >= 0, "packed spectrum addressed below z = 0: {p}");
        Index::new(
            wrap_axis(p.x, self.size.width),
            wrap_axis(p.y, self.size.height),
            p.z as usize,
        )
    }

    fn logical_point(&self, index: Index) -> Point {
        Point::new(
            unwrap_axis(index.x, self.size.width, (self.size.width / 2) as i32),
            unwrap_axis(index.y, self.size.height, (self.size.height / 2) as i32),
            index.z as i32,
        )
    }
}

impl Stores<Complex32> for HalfFrequency {
    const MAP_KIND: MapKind = MapKind::COMPLEX_HALF_FREQUENCY;
}
