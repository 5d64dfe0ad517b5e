//! Handle-specific error types.

use std::error::Error;
use std::fmt;

use crate::handle::MapHandle;
use xtalmap_core::MapError;

/// Errors from resolving or operating through a [`MapHandle`].
#[derive(Clone, Debug, PartialEq)]
pub enum HandleError {
    /// The handle is [`MapHandle::NULL`].
    Null,
    /// The handle's map has been released.
    Stale {
        /// The offending handle.
        handle: MapHandle,
    },
    /// The map rejected the operation.
    Map(MapError),
}

impl fmt::Display for HandleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "operation on a null map handle"),
            Self::Stale { handle } => write!(f, "stale handle: {handle}"),
            Self::Map(e) => write!(f, "map: {e}"),
        }
    }
}

impl Error for HandleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Map(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MapError> for HandleError {
    fn from(e: MapError) -> Self {
        Self::Map(e)
    }
}
