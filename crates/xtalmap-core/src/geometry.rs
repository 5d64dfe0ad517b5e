//! Integer lattice geometry: points, sizes, storage indices and extents.
//!
//! All maps are three-dimensional. Lower-dimensional data uses a size of
//! one along the unused axes.

use crate::error::ExtentError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Neg, Sub};

/// An integer lattice position `(x, y, z)`.
///
/// Points order lexicographically by `(z, y, x)`, which is the order in
/// which storage is laid out (x varies fastest).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
    /// Slice.
    pub z: i32,
}

impl Point {
    /// The coordinate origin.
    pub const ORIGIN: Self = Self::new(0, 0, 0);

    /// Create a point from its components.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Component along `axis` (0 = x, 1 = y, 2 = z).
    ///
    /// # Panics
    ///
    /// Panics if `axis > 2`.
    pub fn component(&self, axis: usize) -> i32 {
        match axis {
            0 => self.x,
            1 => self.y,
            2 => self.z,
            _ => panic!("axis {axis} out of range for a 3D point"),
        }
    }

    /// Components as an array `[x, y, z]`.
    pub fn to_array(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }

    /// Build a point from `[x, y, z]`.
    pub fn from_array(a: [i32; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }

    /// Apply `f` to every component.
    pub fn map(self, mut f: impl FnMut(i32) -> i32) -> Self {
        Self::new(f(self.x), f(self.y), f(self.z))
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.z, self.y, self.x).cmp(&(other.z, other.y, other.x))
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Point {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Number of cells along each axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    /// Cells along x.
    pub width: u32,
    /// Cells along y.
    pub height: u32,
    /// Cells along z.
    pub depth: u32,
}

impl Size {
    /// Create a size from its components.
    pub const fn new(width: u32, height: u32, depth: u32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// A cube of edge `n`.
    pub const fn cube(n: u32) -> Self {
        Self::new(n, n, n)
    }

    /// Component along `axis` (0 = width, 1 = height, 2 = depth).
    ///
    /// # Panics
    ///
    /// Panics if `axis > 2`.
    pub fn component(&self, axis: usize) -> u32 {
        match axis {
            0 => self.width,
            1 => self.height,
            2 => self.depth,
            _ => panic!("axis {axis} out of range for a 3D size"),
        }
    }

    /// Total number of cells.
    pub fn volume(&self) -> usize {
        self.width as usize * self.height as usize * self.depth as usize
    }

    /// `true` if any axis has zero cells.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.depth == 0
    }

    /// Offset of the centre cell.
    ///
    /// Odd `N` gives `(N - 1) / 2`, even `N` gives `N / 2 - 1`, so the
    /// centre of a 4-wide axis is 1 and of a 5-wide axis is 2.
    pub fn half(&self) -> Point {
        fn half_axis(n: u32) -> i32 {
            let n = n as i32;
            if n % 2 == 1 {
                (n - 1) / 2
            } else {
                (n / 2 - 1).max(0)
            }
        }
        Point::new(
            half_axis(self.width),
            half_axis(self.height),
            half_axis(self.depth),
        )
    }

    /// The size as a signed point.
    pub fn to_point(self) -> Point {
        Point::new(self.width as i32, self.height as i32, self.depth as i32)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.height, self.depth)
    }
}

/// Position of a cell inside a flat storage buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Index {
    /// Column.
    pub x: usize,
    /// Row.
    pub y: usize,
    /// Slice.
    pub z: usize,
}

impl Index {
    /// Create an index from its components.
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }
}

/// An inclusive axis-aligned integer box `[start, end]`.
///
/// The invariant `start <= end` holds on every axis; [`Extent::new`]
/// swaps components that arrive in the wrong order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Extent {
    start: Point,
    end: Point,
}

impl Extent {
    /// Create an extent spanning `a` and `b` inclusive.
    pub fn new(a: Point, b: Point) -> Self {
        Self {
            start: Point::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            end: Point::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Create an extent of `size` cells starting at `start`.
    ///
    /// Axes of length zero are treated as length one.
    pub fn from_size(start: Point, size: Size) -> Self {
        let len = |n: u32| (n.max(1) - 1) as i32;
        Self {
            start,
            end: Point::new(
                start.x + len(size.width),
                start.y + len(size.height),
                start.z + len(size.depth),
            ),
        }
    }

    /// Create an extent of `size` cells starting at the origin.
    pub fn at_origin(size: Size) -> Self {
        Self::from_size(Point::ORIGIN, size)
    }

    /// First corner (smallest on every axis).
    pub fn start(&self) -> Point {
        self.start
    }

    /// Last corner (largest on every axis).
    pub fn end(&self) -> Point {
        self.end
    }

    /// Number of cells along each axis (`end - start + 1`).
    pub fn size(&self) -> Size {
        let d = self.end - self.start;
        Size::new(d.x as u32 + 1, d.y as u32 + 1, d.z as u32 + 1)
    }

    /// Total number of cells.
    pub fn volume(&self) -> usize {
        self.size().volume()
    }

    /// Whether `p` lies inside the box.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.start.x
            && p.x <= self.end.x
            && p.y >= self.start.y
            && p.y <= self.end.y
            && p.z >= self.start.z
            && p.z <= self.end.z
    }

    /// Whether `other` lies entirely inside this box.
    pub fn contains_extent(&self, other: &Extent) -> bool {
        self.contains(other.start) && self.contains(other.end)
    }

    /// Whether the boxes share at least one cell.
    pub fn has_overlap(&self, other: &Extent) -> bool {
        self.start.x <= other.end.x
            && other.start.x <= self.end.x
            && self.start.y <= other.end.y
            && other.start.y <= self.end.y
            && self.start.z <= other.end.z
            && other.start.z <= self.end.z
    }

    /// The intersection of two boxes.
    ///
    /// # Errors
    ///
    /// Returns [`ExtentError::Disjoint`] if the boxes do not intersect on
    /// at least one axis.
    pub fn overlap(&self, other: &Extent) -> Result<Extent, ExtentError> {
        if !self.has_overlap(other) {
            return Err(ExtentError::Disjoint {
                a: *self,
                b: *other,
            });
        }
        Ok(Extent {
            start: Point::new(
                self.start.x.max(other.start.x),
                self.start.y.max(other.start.y),
                self.start.z.max(other.start.z),
            ),
            end: Point::new(
                self.end.x.min(other.end.x),
                self.end.y.min(other.end.y),
                self.end.z.min(other.end.z),
            ),
        })
    }

    /// Wrap `p` periodically into the box.
    pub fn wrap_around(&self, p: Point) -> Point {
        let size = self.size().to_point();
        let rel = p - self.start;
        Point::new(
            rel.x.rem_euclid(size.x),
            rel.y.rem_euclid(size.y),
            rel.z.rem_euclid(size.z),
        ) + self.start
    }

    /// The box shifted by `offset`.
    #[must_use]
    pub fn translate(&self, offset: Point) -> Extent {
        Extent {
            start: self.start + offset,
            end: self.end + offset,
        }
    }

    /// Linear storage offset of `p` (x fastest), or `None` if outside.
    pub fn offset_of(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        let size = self.size();
        let rel = p - self.start;
        Some(
            rel.x as usize
                + size.width as usize * (rel.y as usize + size.height as usize * rel.z as usize),
        )
    }

    /// Iterate every point in storage order.
    pub fn points(&self) -> ExtentPoints {
        ExtentPoints {
            extent: *self,
            next: Some(self.start),
            remaining: self.volume(),
        }
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} - {}]", self.start, self.end)
    }
}

impl IntoIterator for &Extent {
    type Item = Point;
    type IntoIter = ExtentPoints;

    fn into_iter(self) -> Self::IntoIter {
        self.points()
    }
}

/// Iterator over the points of an [`Extent`] in storage order.
#[derive(Clone, Debug)]
pub struct ExtentPoints {
    extent: Extent,
    next: Option<Point>,
    remaining: usize,
}

impl Iterator for ExtentPoints {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        let current = self.next?;
        let (start, end) = (self.extent.start, self.extent.end);
        let mut p = current;
        p.x += 1;
        if p.x > end.x {
            p.x = start.x;
            p.y += 1;
            if p.y > end.y {
                p.y = start.y;
                p.z += 1;
            }
        }
        self.next = (p.z <= end.z).then_some(p);
        self.remaining -= 1;
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ExtentPoints {}
