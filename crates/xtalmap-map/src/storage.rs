//! Dense x-fastest storage for map cells.

use crate::value::MapValue;
use xtalmap_core::{Index, MapError, Size};

/// A flat buffer of `size.volume()` cells, x varying fastest.
#[derive(Clone, Debug, PartialEq)]
pub struct ValueStorage<T> {
    size: Size,
    data: Vec<T>,
}

impl<T: MapValue> ValueStorage<T> {
    /// Zero-filled storage of the given shape.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            data: vec![T::default(); size.volume()],
        }
    }

    /// Wrap an existing buffer.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::SizeMismatch`] if `data.len()` differs from
    /// `size.volume()`.
    pub fn from_vec(size: Size, data: Vec<T>) -> Result<Self, MapError> {
        if data.len() != size.volume() {
            return Err(MapError::SizeMismatch {
                expected: size,
                actual: data.len(),
            });
        }
        Ok(Self { size, data })
    }

    /// Shape of the buffer.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `true` if the buffer holds no cells.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    fn offset(&self, i: Index) -> usize {
        debug_assert!(
            i.x < self.size.width as usize
                && i.y < self.size.height as usize
                && i.z < self.size.depth as usize,
            "{i:?} outside storage {}",
            self.size
        );
        i.x + self.size.width as usize * (i.y + self.size.height as usize * i.z)
    }

    /// Inverse of the linear offset.
    pub fn index_of(&self, offset: usize) -> Index {
        let w = self.size.width as usize;
        let h = self.size.height as usize;
        Index::new(offset % w, (offset / w) % h, offset / (w * h))
    }

    /// Read a cell.
    #[inline]
    pub fn get(&self, i: Index) -> T {
        self.data[self.offset(i)]
    }

    /// Mutable access to a cell.
    #[inline]
    pub fn get_mut(&mut self, i: Index) -> &mut T {
        let o = self.offset(i);
        &mut self.data[o]
    }

    /// Set every cell to `v`.
    pub fn fill(&mut self, v: T) {
        self.data.fill(v);
    }

    /// The raw buffer.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// The raw buffer, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume and return the raw buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}
