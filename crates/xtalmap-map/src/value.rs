//! Element types a map can store and the conversions between them.

use num_complex::Complex;
use std::fmt;
use xtalmap_core::ValueType;

/// Single-precision complex value, the element type of spectral maps.
pub type Complex32 = Complex<f32>;

/// A value that can live in a map cell.
///
/// Every value type converts to and from `f32` and [`Complex32`] so that
/// operations between maps of different value types can be expressed
/// once, in the complex plane, and narrowed on write.
pub trait MapValue: Copy + Default + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Runtime tag for this type.
    const VALUE_TYPE: ValueType;

    /// Real part.
    fn to_real(self) -> f32;

    /// Widened to complex.
    fn to_complex(self) -> Complex32;

    /// Narrowed from a real value.
    fn from_real(v: f32) -> Self;

    /// Narrowed from a complex value (imaginary part is dropped by
    /// non-complex types).
    fn from_complex(v: Complex32) -> Self;

    /// Complex conjugate (identity for non-complex types).
    #[must_use]
    fn conj(self) -> Self;
}

impl MapValue for f32 {
    const VALUE_TYPE: ValueType = ValueType::Real;

    fn to_real(self) -> f32 {
        self
    }

    fn to_complex(self) -> Complex32 {
        Complex32::new(self, 0.0)
    }

    fn from_real(v: f32) -> Self {
        v
    }

    fn from_complex(v: Complex32) -> Self {
        v.re
    }

    fn conj(self) -> Self {
        self
    }
}

impl MapValue for Complex32 {
    const VALUE_TYPE: ValueType = ValueType::Complex;

    fn to_real(self) -> f32 {
        self.re
    }

    fn to_complex(self) -> Complex32 {
        self
    }

    fn from_real(v: f32) -> Self {
        Complex32::new(v, 0.0)
    }

    fn from_complex(v: Complex32) -> Self {
        v
    }

    fn conj(self) -> Self {
        Complex::conj(&self)
    }
}

impl MapValue for u8 {
    const VALUE_TYPE: ValueType = ValueType::Byte;

    fn to_real(self) -> f32 {
        f32::from(self)
    }

    fn to_complex(self) -> Complex32 {
        Complex32::new(f32::from(self), 0.0)
    }

    /// Rounds to nearest and saturates to `0..=255`; NaN becomes 0.
    fn from_real(v: f32) -> Self {
        v.round().clamp(0.0, 255.0) as u8
    }

    fn from_complex(v: Complex32) -> Self {
        Self::from_real(v.re)
    }

    fn conj(self) -> Self {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_narrowing_saturates() {
        assert_eq!(u8::from_real(-3.0), 0);
        assert_eq!(u8::from_real(254.6), 255);
        assert_eq!(u8::from_real(300.0), 255);
        assert_eq!(u8::from_real(f32::NAN), 0);
        assert_eq!(u8::from_real(7.4), 7);
    }

    #[test]
    fn complex_conj_flips_imaginary_part() {
        let v = Complex32::new(1.5, -2.0);
        assert_eq!(MapValue::conj(v), Complex32::new(1.5, 2.0));
        assert_eq!(MapValue::conj(3.0f32), 3.0);
    }

    #[test]
    fn real_from_complex_drops_imaginary() {
        assert_eq!(f32::from_complex(Complex32::new(4.0, 9.0)), 4.0);
    }
}
