//! Geometric masks for xtalmap maps.
//!
//! A [`Mask`] answers whether a pixel coordinate is inside it;
//! [`apply_mask`] overwrites everything outside. Masks persist as a
//! [`TreeGroup`] of named groups and items (see [`tree`]), which derives
//! `serde` traits so any serde format can store it.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod apply;
pub mod mask;
pub mod tree;

pub use apply::apply_mask;
pub use mask::{CompositeOp, Mask};
pub use tree::{from_tree, to_tree, MaskTreeError, TreeGroup, TreeItem};
