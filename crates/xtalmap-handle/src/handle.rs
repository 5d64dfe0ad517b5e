//! Map handles and observer ids.
//!
//! A [`MapHandle`] names an arena slot and the generation the slot had
//! when the handle was issued. Reclaiming a slot bumps its generation, so
//! handles to released maps are detected in O(1) without a lookup table.

use std::fmt;

/// Generational reference to a map in a [`MapArena`](crate::MapArena).
///
/// Handles are `Copy`; two equal handles alias the same map. The
/// generation `0` is never issued, so [`MapHandle::NULL`] can never
/// resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct MapHandle {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl MapHandle {
    /// A handle that refers to nothing.
    pub const NULL: Self = Self {
        index: 0,
        generation: 0,
    };

    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Whether this is the null handle.
    pub fn is_null(&self) -> bool {
        self.generation == 0
    }

    /// Slot index.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Slot generation at issue time.
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl Default for MapHandle {
    fn default() -> Self {
        Self::NULL
    }
}

impl fmt::Display for MapHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "MapHandle(null)")
        } else {
            write!(f, "MapHandle({}@{})", self.index, self.generation)
        }
    }
}

/// Identifies one observer subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(pub u64);

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ObserverId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_handle_is_default() {
        assert!(MapHandle::default().is_null());
        assert!(!MapHandle::new(0, 1).is_null());
        assert_eq!(MapHandle::NULL.to_string(), "MapHandle(null)");
        assert_eq!(MapHandle::new(3, 7).to_string(), "MapHandle(3@7)");
    }
}
