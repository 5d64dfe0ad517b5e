//! Compound assignment against scalars, other maps and functions.
//!
//! Every operation is evaluated in the complex plane and narrowed back to
//! the destination's value type on write. Only canonical cells are
//! touched, so the redundant half of a packed spectrum is never written.

use crate::domain::{Domain, Spectral, Stores};
use crate::state::MapState;
use crate::value::{Complex32, MapValue};
use nalgebra::Vector3;
use std::f64::consts::TAU;
use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};
use xtalmap_core::{Extent, Point};

/// How an incoming value is combined with the stored one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompoundOp {
    /// Replace.
    Assign,
    /// `+=`
    Add,
    /// `-=`
    Sub,
    /// `*=`
    Mul,
    /// `/=`
    Div,
}

impl CompoundOp {
    /// `current (op) incoming`.
    #[inline]
    pub fn combine(self, current: Complex32, incoming: Complex32) -> Complex32 {
        match self {
            Self::Assign => incoming,
            Self::Add => current + incoming,
            Self::Sub => current - incoming,
            Self::Mul => current * incoming,
            Self::Div => current / incoming,
        }
    }
}

/// A function that can be sampled at physical coordinates.
pub trait MapFunction {
    /// Value at physical coordinate `at`.
    fn evaluate(&self, at: &Vector3<f64>) -> Complex32;
}

impl<F: Fn(&Vector3<f64>) -> Complex32> MapFunction for F {
    fn evaluate(&self, at: &Vector3<f64>) -> Complex32 {
        self(at)
    }
}

#[inline]
fn apply_to<T: MapValue>(op: CompoundOp, cell: &mut T, incoming: Complex32) {
    *cell = T::from_complex(op.combine(cell.to_complex(), incoming));
}

impl<T: MapValue, D: Stores<T>> MapState<T, D> {
    /// Combine every canonical cell with `v`.
    pub fn apply_scalar(&mut self, op: CompoundOp, v: Complex32) {
        self.for_each_cell_mut(|_, cell| apply_to(op, cell, v));
    }

    /// Combine this map with `other` over the overlap of their logical
    /// extents. Returns the overlap, or `None` (and does nothing) if the
    /// maps are disjoint.
    pub fn apply_map<T2: MapValue, D2: Stores<T2>>(
        &mut self,
        op: CompoundOp,
        other: &MapState<T2, D2>,
    ) -> Option<Extent> {
        let overlap = self.extent().overlap(&other.extent()).ok()?;
        for p in overlap.points() {
            if self.domain().writable(p).is_some() {
                let incoming = other.get_complex(p);
                apply_to(op, self.value_mut(p), incoming);
            }
        }
        Some(overlap)
    }

    /// Combine every canonical cell with `f` sampled at the cell's
    /// physical coordinate.
    pub fn apply_function<F: MapFunction + ?Sized>(&mut self, op: CompoundOp, f: &F) {
        let points: Vec<Point> = self.cells().map(|(p, _)| p).collect();
        for p in points {
            let incoming = f.evaluate(&self.physical_coordinate(p));
            apply_to(op, self.value_mut(p), incoming);
        }
    }
}

impl<D: Stores<Complex32> + Spectral> MapState<Complex32, D> {
    /// Multiply every stored cell by `exp(-2πi Σ shift[i]·k[i] / N[i])`,
    /// where `k` is the cell's signed logical frequency and `N` the
    /// logical size.
    ///
    /// After a spectral transform of a map whose first sample sits at
    /// `shift` rather than the origin, this moves the phase reference to
    /// the origin. Applying `-shift` undoes it.
    pub fn adjust_phase_origin(&mut self, shift: Point) {
        if shift == Point::ORIGIN {
            return;
        }
        let n = self.extent().size();
        let sizes = [n.width, n.height, n.depth].map(f64::from);
        let shift = shift.to_array().map(f64::from);
        let len = self.storage().len();
        for offset in 0..len {
            let index = self.storage().index_of(offset);
            let k = self.domain().logical_point(index).to_array();
            let turns: f64 = (0..3)
                .map(|i| shift[i] * f64::from(k[i]) / sizes[i])
                .sum();
            let (s, c) = (-TAU * turns).sin_cos();
            let cell = self.storage_mut().get_mut(index);
            *cell *= Complex32::new(c as f32, s as f32);
        }
    }
}

macro_rules! scalar_assign {
    ($trait:ident, $method:ident, $op:expr) => {
        impl<T: MapValue, D: Stores<T>> $trait<f32> for MapState<T, D> {
            fn $method(&mut self, rhs: f32) {
                self.apply_scalar($op, Complex32::new(rhs, 0.0));
            }
        }

        impl<T: MapValue, D: Stores<T>> $trait<Complex32> for MapState<T, D> {
            fn $method(&mut self, rhs: Complex32) {
                self.apply_scalar($op, rhs);
            }
        }

        impl<T, D, T2, D2> $trait<&MapState<T2, D2>> for MapState<T, D>
        where
            T: MapValue,
            D: Stores<T>,
            T2: MapValue,
            D2: Stores<T2>,
        {
            fn $method(&mut self, rhs: &MapState<T2, D2>) {
                self.apply_map($op, rhs);
            }
        }
    };
}

scalar_assign!(AddAssign, add_assign, CompoundOp::Add);
scalar_assign!(SubAssign, sub_assign, CompoundOp::Sub);
scalar_assign!(MulAssign, mul_assign, CompoundOp::Mul);
scalar_assign!(DivAssign, div_assign, CompoundOp::Div);
