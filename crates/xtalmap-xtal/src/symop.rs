//! Integer-lattice symmetry operators.

use nalgebra::{Matrix3, Vector3};
use std::fmt;
use xtalmap_core::{Point, Size};

/// A crystallographic symmetry operator acting on grid points:
/// `p' = R·p + t` with integer `R` and `t`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IntSymOp {
    rotation: [[i32; 3]; 3],
    translation: Point,
}

impl IntSymOp {
    /// The identity operator.
    pub const IDENTITY: Self = Self {
        rotation: [[1, 0, 0], [0, 1, 0], [0, 0, 1]],
        translation: Point::ORIGIN,
    };

    /// An operator from a row-major rotation and a translation.
    pub const fn new(rotation: [[i32; 3]; 3], translation: Point) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// Convert a fractional operator for a grid of `cell` samples.
    ///
    /// Rotation entries are rounded to the nearest integer; the
    /// translation becomes `round(t[i] · cell[i])` grid steps.
    pub fn from_fractional(rotation: &Matrix3<f64>, translation: &Vector3<f64>, cell: Size) -> Self {
        let mut r = [[0i32; 3]; 3];
        for (i, row) in r.iter_mut().enumerate() {
            for (j, v) in row.iter_mut().enumerate() {
                *v = rotation[(i, j)].round() as i32;
            }
        }
        let t = |axis: usize| (translation[axis] * f64::from(cell.component(axis))).round() as i32;
        Self::new(r, Point::new(t(0), t(1), t(2)))
    }

    /// Row-major rotation.
    pub fn rotation(&self) -> [[i32; 3]; 3] {
        self.rotation
    }

    /// Translation in grid steps.
    pub fn translation(&self) -> Point {
        self.translation
    }

    /// Whether this is the identity.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Column `axis` of the rotation: the change in `transform(p)` when
    /// `p` moves one step along `axis`.
    pub fn column(&self, axis: usize) -> Point {
        Point::new(
            self.rotation[0][axis],
            self.rotation[1][axis],
            self.rotation[2][axis],
        )
    }

    /// `R·p + t`.
    #[inline]
    pub fn transform(&self, p: Point) -> Point {
        let r = &self.rotation;
        Point::new(
            r[0][0] * p.x + r[0][1] * p.y + r[0][2] * p.z,
            r[1][0] * p.x + r[1][1] * p.y + r[1][2] * p.z,
            r[2][0] * p.x + r[2][1] * p.y + r[2][2] * p.z,
        ) + self.translation
    }
}

impl Default for IntSymOp {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for IntSymOp {
    /// Formats as `x',y',z'` expressions, e.g. `-x,y+2,-z`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const AXES: [char; 3] = ['x', 'y', 'z'];
        for (i, row) in self.rotation.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            let mut wrote = false;
            for (j, &c) in row.iter().enumerate() {
                match c {
                    0 => continue,
                    1 if wrote => write!(f, "+{}", AXES[j])?,
                    1 => write!(f, "{}", AXES[j])?,
                    -1 => write!(f, "-{}", AXES[j])?,
                    c if c > 0 && wrote => write!(f, "+{c}{}", AXES[j])?,
                    c => write!(f, "{c}{}", AXES[j])?,
                }
                wrote = true;
            }
            let t = self.translation.component(i);
            match (t, wrote) {
                (0, true) => {}
                (0, false) => write!(f, "0")?,
                (t, true) if t > 0 => write!(f, "+{t}")?,
                (t, _) => write!(f, "{t}")?,
            }
        }
        Ok(())
    }
}
