//! Change notification for arena slots.

use crate::handle::MapHandle;
use xtalmap_core::{Extent, Point};

/// What changed in an observed map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MapEvent {
    /// Any part of the map may have changed, or the map was replaced.
    Whole,
    /// Only cells inside this extent changed.
    Extent(Extent),
    /// Only this point changed.
    Point(Point),
    /// The last handle was released.
    Released,
    /// The slot is about to be reclaimed; the handle no longer resolves
    /// once notification returns.
    Invalidated,
}

/// Receives [`MapEvent`]s for one arena slot.
///
/// Observers are called synchronously, in subscription order, after the
/// mutation has been applied. Closures taking `(MapHandle, &MapEvent)`
/// implement this trait.
pub trait MapObserver {
    /// Handle one event.
    fn notify(&mut self, handle: MapHandle, event: &MapEvent);
}

impl<F: FnMut(MapHandle, &MapEvent)> MapObserver for F {
    fn notify(&mut self, handle: MapHandle, event: &MapEvent) {
        self(handle, event)
    }
}
