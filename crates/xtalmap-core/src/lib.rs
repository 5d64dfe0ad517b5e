//! Core types for the xtalmap map engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the integer lattice geometry every other crate speaks in
//! ([`Point`], [`Size`], [`Index`], [`Extent`]), the closed set of map
//! identities ([`MapKind`]), and the shared error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod geometry;
pub mod kind;

pub use error::{ExtentError, MapError};
pub use geometry::{Extent, ExtentPoints, Index, Point, Size};
pub use kind::{DomainKind, MapKind, ValueType};
