//! xtalmap: density maps over real and reciprocal space, with
//! crystallographic symmetry.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all xtalmap sub-crates. For most users, adding `xtalmap` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use xtalmap::prelude::*;
//!
//! // A shared 4×4×4 real-space map.
//! let mut arena = MapArena::new();
//! let h = arena.create(MapKind::REAL_SPATIAL, Extent::at_origin(Size::cube(4)));
//! arena.set_real(h, Point::new(1, 2, 3), 5.0).unwrap();
//! assert_eq!(arena.get(h).unwrap().get_real(Point::new(1, 2, 3)), 5.0);
//!
//! // A P-1 crystal storing half of a 4×4×4 cell.
//! let config = CrystalConfig {
//!     unit_cell: Extent::at_origin(Size::cube(4)),
//!     asu: Extent::new(Point::ORIGIN, Point::new(2, 3, 3)),
//!     symops: vec![
//!         IntSymOp::IDENTITY,
//!         IntSymOp::new([[-1, 0, 0], [0, -1, 0], [0, 0, -1]], Point::ORIGIN),
//!     ],
//! };
//! let mut xtal = CrystalMap::new(config).unwrap();
//! xtal.set_real(Point::new(1, 1, 1), 2.0);
//! assert_eq!(xtal.get_real(Point::new(-1, -1, -1)), 2.0);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `xtalmap-core` | Points, sizes, extents, map kinds, errors |
//! | [`map`] | `xtalmap-map` | Domains, map states, interpolation, arithmetic, `AnyMap` |
//! | [`handle`] | `xtalmap-handle` | Map arena, handles, observers |
//! | [`xtal`] | `xtalmap-xtal` | Symmetry operators, crystal maps |
//! | [`mask`] | `xtalmap-mask` | Masks and their persisted tree form |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Geometry, map kinds and error types (`xtalmap-core`).
pub use xtalmap_core as types;

/// Map states and operations (`xtalmap-map`).
///
/// [`map::MapState`] is the statically typed map; [`map::AnyMap`] covers
/// every valid [`types::MapKind`] behind one enum.
pub use xtalmap_map as map;

/// Shared, observable maps (`xtalmap-handle`).
pub use xtalmap_handle as handle;

/// Crystallographic symmetry (`xtalmap-xtal`).
///
/// Build an [`xtal::CrystalMap`] from an [`xtal::CrystalConfig`] and walk
/// it with [`xtal::XtalExtentIterator`].
pub use xtalmap_xtal as xtal;

/// Masks (`xtalmap-mask`).
pub use xtalmap_mask as mask;

/// Common imports for typical xtalmap usage.
///
/// ```rust
/// use xtalmap::prelude::*;
/// ```
pub mod prelude {
    // Geometry and kinds
    pub use xtalmap_core::{DomainKind, Extent, MapKind, Point, Size, ValueType};

    // Errors
    pub use xtalmap_core::{ExtentError, MapError};
    pub use xtalmap_handle::HandleError;
    pub use xtalmap_mask::MaskTreeError;
    pub use xtalmap_xtal::CrystalConfigError;

    // Maps
    pub use xtalmap_map::{
        AnyMap, Complex32, CompoundOp, MapDescriptor, MapState, MapStats, PixelSampling,
        SpectralTransform,
    };

    // Handles
    pub use xtalmap_handle::{MapArena, MapEvent, MapHandle, MapObserver};

    // Symmetry
    pub use xtalmap_xtal::{CrystalConfig, CrystalMap, IntSymOp};

    // Masks
    pub use xtalmap_mask::{apply_mask, Mask};
}
