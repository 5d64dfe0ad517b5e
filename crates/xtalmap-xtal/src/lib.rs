//! Crystallographic symmetry for xtalmap.
//!
//! A [`CrystalMap`] stores one asymmetric unit (ASU) and a list of integer
//! symmetry operators ([`IntSymOp`]), and answers reads and writes at any
//! point of the infinite periodic crystal by resolving the point onto its
//! canonical ASU voxel. [`XtalExtentIterator`] walks a box of the crystal
//! while avoiding a full symmetry search at most steps.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod crystal;
pub mod iter;
pub mod symop;

pub use config::{CrystalConfig, CrystalConfigError, MAX_SYMOPS};
pub use crystal::{CrystalMap, SymMatch, CANONICAL, UNRESOLVED};
pub use iter::{XtalExtentIterator, XtalVoxel};
pub use symop::IntSymOp;
