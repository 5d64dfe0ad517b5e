//! Generational handles to shared, observable maps.
//!
//! A [`MapArena`] owns every map; callers hold [`MapHandle`]s. Equal
//! handles alias one map, so a mutation through any of them is visible
//! through all. Observers subscribe per slot and receive [`MapEvent`]s
//! synchronously after each mutating arena operation.
//!
//! ```text
//! MapArena
//! └── Slot[] (generation, refs, AnyMap, observers in subscription order)
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod error;
pub mod handle;
pub mod observer;

pub use arena::MapArena;
pub use error::HandleError;
pub use handle::{MapHandle, ObserverId};
pub use observer::{MapEvent, MapObserver};
