//! [`MapArena`]: slot storage for maps addressed by generational handles.
//!
//! Every slot holds one [`AnyMap`], a reference count and the observers
//! subscribed to it. All handles that are equal alias the same slot:
//! [`set`](MapArena::set) and [`swap`](MapArena::swap) replace what every
//! alias sees, and observers are shared by all aliases.
//!
//! Releasing the last reference notifies [`MapEvent::Released`] and then
//! [`MapEvent::Invalidated`], drops the map and the observers, and bumps
//! the slot generation so outstanding handles go stale.

use std::fmt;

use indexmap::IndexMap;
use tracing::trace;
use xtalmap_core::{Extent, MapKind, Point};
use xtalmap_map::{AnyMap, Complex32, CompoundOp};

use crate::error::HandleError;
use crate::handle::{MapHandle, ObserverId};
use crate::observer::{MapEvent, MapObserver};

struct Slot {
    generation: u32,
    refs: u32,
    state: Option<AnyMap>,
    observers: IndexMap<ObserverId, Box<dyn MapObserver>>,
}

/// Owns every map and hands out [`MapHandle`]s.
///
/// Single-threaded: observers are plain `FnMut`/trait objects, so the
/// arena is neither `Send` nor `Sync`.
pub struct MapArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
    next_observer: u64,
}

impl Default for MapArena {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MapArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapArena")
            .field("slots", &self.slots.len())
            .field("live", &self.live)
            .field("free", &self.free.len())
            .finish()
    }
}

fn next_generation(g: u32) -> u32 {
    g.wrapping_add(1).max(1)
}

impl MapArena {
    /// An empty arena.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
            next_observer: 0,
        }
    }

    /// Number of live maps.
    pub fn len(&self) -> usize {
        self.live
    }

    /// Whether no maps are live.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Whether `h` resolves.
    pub fn is_live(&self, h: MapHandle) -> bool {
        self.slot(h).is_ok()
    }

    fn slot(&self, h: MapHandle) -> Result<&Slot, HandleError> {
        if h.is_null() {
            return Err(HandleError::Null);
        }
        match self.slots.get(h.index as usize) {
            Some(s) if s.generation == h.generation && s.state.is_some() => Ok(s),
            _ => Err(HandleError::Stale { handle: h }),
        }
    }

    fn slot_mut(&mut self, h: MapHandle) -> Result<&mut Slot, HandleError> {
        if h.is_null() {
            return Err(HandleError::Null);
        }
        match self.slots.get_mut(h.index as usize) {
            Some(s) if s.generation == h.generation && s.state.is_some() => Ok(s),
            _ => Err(HandleError::Stale { handle: h }),
        }
    }

    fn notify(&mut self, h: MapHandle, event: MapEvent) {
        if let Some(slot) = self.slots.get_mut(h.index as usize) {
            for observer in slot.observers.values_mut() {
                observer.notify(h, &event);
            }
        }
    }

    /// Take ownership of `map` and return a handle with one reference.
    pub fn insert(&mut self, map: AnyMap) -> MapHandle {
        let kind = map.kind();
        let h = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.state = Some(map);
                slot.refs = 1;
                MapHandle::new(index, slot.generation)
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 1,
                    refs: 1,
                    state: Some(map),
                    observers: IndexMap::new(),
                });
                MapHandle::new(index, 1)
            }
        };
        self.live += 1;
        trace!(handle = %h, %kind, "allocated map slot");
        h
    }

    /// Allocate a zero-filled map.
    pub fn create(&mut self, kind: MapKind, extent: Extent) -> MapHandle {
        self.insert(AnyMap::new(kind, extent))
    }

    /// Borrow the map behind `h`.
    ///
    /// # Errors
    ///
    /// [`HandleError::Null`] or [`HandleError::Stale`].
    pub fn get(&self, h: MapHandle) -> Result<&AnyMap, HandleError> {
        self.slot(h)?
            .state
            .as_ref()
            .ok_or(HandleError::Stale { handle: h })
    }

    /// Mutably borrow the map behind `h` without notifying observers.
    /// Use [`MapArena::modify`] when observers must hear about the change.
    ///
    /// # Errors
    ///
    /// [`HandleError::Null`] or [`HandleError::Stale`].
    pub fn get_mut(&mut self, h: MapHandle) -> Result<&mut AnyMap, HandleError> {
        self.slot_mut(h)?
            .state
            .as_mut()
            .ok_or(HandleError::Stale { handle: h })
    }

    /// Add a reference to the map behind `h` and return an aliasing
    /// handle (equal to `h`).
    ///
    /// # Errors
    ///
    /// [`HandleError::Null`] or [`HandleError::Stale`].
    pub fn alias(&mut self, h: MapHandle) -> Result<MapHandle, HandleError> {
        self.slot_mut(h)?.refs += 1;
        Ok(h)
    }

    /// Number of outstanding references.
    ///
    /// # Errors
    ///
    /// [`HandleError::Null`] or [`HandleError::Stale`].
    pub fn ref_count(&self, h: MapHandle) -> Result<u32, HandleError> {
        Ok(self.slot(h)?.refs)
    }

    /// Drop one reference. Returns `true` if this was the last one and
    /// the slot was reclaimed.
    ///
    /// # Errors
    ///
    /// [`HandleError::Null`] or [`HandleError::Stale`].
    pub fn release(&mut self, h: MapHandle) -> Result<bool, HandleError> {
        let slot = self.slot_mut(h)?;
        slot.refs = slot.refs.saturating_sub(1);
        if slot.refs > 0 {
            return Ok(false);
        }
        self.notify(h, MapEvent::Released);
        self.notify(h, MapEvent::Invalidated);
        let slot = &mut self.slots[h.index as usize];
        slot.state = None;
        slot.observers.clear();
        slot.generation = next_generation(slot.generation);
        self.free.push(h.index);
        self.live -= 1;
        trace!(handle = %h, "reclaimed map slot");
        Ok(true)
    }

    /// A new map with one reference: a deep clone of `h`, or a zero-filled
    /// map of the same kind and extent.
    ///
    /// # Errors
    ///
    /// [`HandleError::Null`] or [`HandleError::Stale`].
    pub fn copy(&mut self, h: MapHandle, deep: bool) -> Result<MapHandle, HandleError> {
        let src = self.get(h)?;
        let map = if deep { src.clone() } else { src.copy_empty() };
        Ok(self.insert(map))
    }

    /// A new spatial map of `extent` with the same value type, filled from
    /// the overlapping part of `h`.
    ///
    /// # Errors
    ///
    /// [`HandleError::Null`] or [`HandleError::Stale`].
    pub fn extract(&mut self, h: MapHandle, extent: Extent) -> Result<MapHandle, HandleError> {
        let map = self.get(h)?.extract(extent);
        Ok(self.insert(map))
    }

    /// Replace the map behind `h` for every alias. Returns the old map.
    ///
    /// # Errors
    ///
    /// [`HandleError::Null`] or [`HandleError::Stale`].
    pub fn set(&mut self, h: MapHandle, map: AnyMap) -> Result<AnyMap, HandleError> {
        let old = self
            .slot_mut(h)?
            .state
            .replace(map)
            .ok_or(HandleError::Stale { handle: h })?;
        self.notify(h, MapEvent::Whole);
        Ok(old)
    }

    /// Exchange the maps behind `a` and `b`. Observers stay with their
    /// slots and both are notified.
    ///
    /// # Errors
    ///
    /// [`HandleError::Null`] or [`HandleError::Stale`] for either handle.
    pub fn swap(&mut self, a: MapHandle, b: MapHandle) -> Result<(), HandleError> {
        self.slot(a)?;
        self.slot(b)?;
        if a == b {
            return Ok(());
        }
        let (ia, ib) = (a.index as usize, b.index as usize);
        let taken = self.slots[ia].state.take();
        let other = std::mem::replace(&mut self.slots[ib].state, taken);
        self.slots[ia].state = other;
        self.notify(a, MapEvent::Whole);
        self.notify(b, MapEvent::Whole);
        Ok(())
    }

    /// Mutate the map behind `h` and notify [`MapEvent::Whole`].
    ///
    /// # Errors
    ///
    /// [`HandleError::Null`] or [`HandleError::Stale`].
    pub fn modify<R>(
        &mut self,
        h: MapHandle,
        f: impl FnOnce(&mut AnyMap) -> R,
    ) -> Result<R, HandleError> {
        let r = f(self.get_mut(h)?);
        self.notify(h, MapEvent::Whole);
        Ok(r)
    }

    /// Store a real value and notify [`MapEvent::Point`] if the write
    /// landed.
    ///
    /// # Errors
    ///
    /// [`HandleError::Null`] or [`HandleError::Stale`].
    pub fn set_real(&mut self, h: MapHandle, p: Point, v: f32) -> Result<bool, HandleError> {
        let written = self.get_mut(h)?.set_real(p, v);
        if written {
            self.notify(h, MapEvent::Point(p));
        }
        Ok(written)
    }

    /// Store a complex value and notify [`MapEvent::Point`] if the write
    /// landed.
    ///
    /// # Errors
    ///
    /// [`HandleError::Null`] or [`HandleError::Stale`].
    pub fn set_complex(
        &mut self,
        h: MapHandle,
        p: Point,
        v: Complex32,
    ) -> Result<bool, HandleError> {
        let written = self.get_mut(h)?.set_complex(p, v);
        if written {
            self.notify(h, MapEvent::Point(p));
        }
        Ok(written)
    }

    fn with_pair<R>(
        &mut self,
        dst: MapHandle,
        src: MapHandle,
        f: impl FnOnce(&mut AnyMap, &AnyMap) -> R,
    ) -> Result<R, HandleError> {
        self.slot(dst)?;
        self.slot(src)?;
        // Equal live handles are the only way to name one slot twice.
        if dst == src {
            let source = self.get(src)?.clone();
            return Ok(f(self.get_mut(dst)?, &source));
        }
        let (di, si) = (dst.index as usize, src.index as usize);
        let (d, s) = if di < si {
            let (lo, hi) = self.slots.split_at_mut(si);
            (&mut lo[di], &hi[0])
        } else {
            let (lo, hi) = self.slots.split_at_mut(di);
            (&mut hi[0], &lo[si])
        };
        match (d.state.as_mut(), s.state.as_ref()) {
            (Some(d), Some(s)) => Ok(f(d, s)),
            (None, _) => Err(HandleError::Stale { handle: dst }),
            (_, None) => Err(HandleError::Stale { handle: src }),
        }
    }

    /// Paste the overlap of `src` into `dst` and notify
    /// [`MapEvent::Extent`] on `dst`. Returns the overlap.
    ///
    /// # Errors
    ///
    /// [`HandleError::Null`] or [`HandleError::Stale`] for either handle.
    pub fn paste(&mut self, dst: MapHandle, src: MapHandle) -> Result<Option<Extent>, HandleError> {
        let overlap = self.with_pair(dst, src, |d, s| d.paste(s))?;
        if let Some(e) = overlap {
            self.notify(dst, MapEvent::Extent(e));
        }
        Ok(overlap)
    }

    /// Combine `dst` with `src` over their overlap and notify
    /// [`MapEvent::Extent`] on `dst`. Returns the overlap.
    ///
    /// # Errors
    ///
    /// [`HandleError::Null`] or [`HandleError::Stale`] for either handle.
    pub fn apply_map(
        &mut self,
        dst: MapHandle,
        op: CompoundOp,
        src: MapHandle,
    ) -> Result<Option<Extent>, HandleError> {
        let overlap = self.with_pair(dst, src, |d, s| d.apply_map(op, s))?;
        if let Some(e) = overlap {
            self.notify(dst, MapEvent::Extent(e));
        }
        Ok(overlap)
    }

    /// Combine every cell with a scalar and notify [`MapEvent::Whole`].
    ///
    /// # Errors
    ///
    /// [`HandleError::Null`] or [`HandleError::Stale`].
    pub fn apply_scalar(
        &mut self,
        h: MapHandle,
        op: CompoundOp,
        v: Complex32,
    ) -> Result<(), HandleError> {
        self.modify(h, |m| m.apply_scalar(op, v))
    }

    /// Shift the phase reference of a complex spectrum.
    ///
    /// # Errors
    ///
    /// [`HandleError::Null`], [`HandleError::Stale`], or
    /// [`HandleError::Map`] if the map is not a complex spectrum.
    pub fn adjust_phase_origin(&mut self, h: MapHandle, shift: Point) -> Result<(), HandleError> {
        self.get_mut(h)?.adjust_phase_origin(shift)?;
        self.notify(h, MapEvent::Whole);
        Ok(())
    }

    /// Attach an observer to the slot behind `h`.
    ///
    /// # Errors
    ///
    /// [`HandleError::Null`] or [`HandleError::Stale`].
    pub fn subscribe(
        &mut self,
        h: MapHandle,
        observer: impl MapObserver + 'static,
    ) -> Result<ObserverId, HandleError> {
        let id = ObserverId(self.next_observer);
        self.slot_mut(h)?.observers.insert(id, Box::new(observer));
        self.next_observer += 1;
        Ok(id)
    }

    /// Detach an observer. Returns `false` if it was not subscribed.
    ///
    /// # Errors
    ///
    /// [`HandleError::Null`] or [`HandleError::Stale`].
    pub fn unsubscribe(&mut self, h: MapHandle, id: ObserverId) -> Result<bool, HandleError> {
        Ok(self.slot_mut(h)?.observers.shift_remove(&id).is_some())
    }
}
