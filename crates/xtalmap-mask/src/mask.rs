//! Geometric masks in pixel coordinates.

use nalgebra::{Vector2, Vector3};
use std::fmt;
use std::str::FromStr;

/// Boolean combination used by [`Mask::Composite`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompositeOp {
    /// Inside both.
    And,
    /// Inside either.
    Or,
    /// Inside exactly one.
    Xor,
}

impl CompositeOp {
    /// Persisted spelling: `AND`, `OR` or `XOR`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
        }
    }

    /// Combine two membership tests.
    pub fn combine(&self, a: bool, b: bool) -> bool {
        match self {
            Self::And => a && b,
            Self::Or => a || b,
            Self::Xor => a ^ b,
        }
    }
}

impl fmt::Display for CompositeOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompositeOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AND" => Ok(Self::And),
            "OR" => Ok(Self::Or),
            "XOR" => Ok(Self::Xor),
            other => Err(other.to_string()),
        }
    }
}

/// A region of pixel space.
///
/// The 2-D variants (`Circle`, `Extent`, `Polygon`) test only `x` and `y`
/// and accept every `z`.
#[derive(Clone, Debug, PartialEq)]
pub enum Mask {
    /// Closed disk.
    Circle {
        /// Centre.
        center: Vector2<f64>,
        /// Radius.
        radius: f64,
    },
    /// Axis-aligned integer rectangle, both corners inclusive.
    Extent {
        /// Minimum corner.
        start: [i64; 2],
        /// Maximum corner.
        end: [i64; 2],
    },
    /// Simple polygon, even-odd rule.
    Polygon {
        /// Vertices in order; the last connects back to the first.
        nodes: Vec<Vector2<f64>>,
    },
    /// Closed ball.
    Sphere {
        /// Centre.
        origin: Vector3<f64>,
        /// Radius.
        radius: f64,
    },
    /// Boolean combination of two masks.
    Composite {
        /// How the two memberships combine.
        op: CompositeOp,
        /// Left operand.
        a: Box<Mask>,
        /// Right operand.
        b: Box<Mask>,
    },
    /// Complement of a mask.
    Invert(Box<Mask>),
}

impl Mask {
    /// Shorthand for [`Mask::Composite`].
    pub fn composite(op: CompositeOp, a: Mask, b: Mask) -> Self {
        Self::Composite {
            op,
            a: Box::new(a),
            b: Box::new(b),
        }
    }

    /// Shorthand for [`Mask::Invert`].
    pub fn invert(mask: Mask) -> Self {
        Self::Invert(Box::new(mask))
    }

    /// Whether `p` lies in the mask.
    pub fn is_inside(&self, p: &Vector3<f64>) -> bool {
        match self {
            Self::Circle { center, radius } => {
                (p.xy() - center).norm_squared() <= radius * radius
            }
            Self::Extent { start, end } => {
                (start[0] as f64..=end[0] as f64).contains(&p.x)
                    && (start[1] as f64..=end[1] as f64).contains(&p.y)
            }
            Self::Polygon { nodes } => polygon_contains(nodes, p.x, p.y),
            Self::Sphere { origin, radius } => (p - origin).norm_squared() <= radius * radius,
            Self::Composite { op, a, b } => op.combine(a.is_inside(p), b.is_inside(p)),
            Self::Invert(m) => !m.is_inside(p),
        }
    }
}

// Crossing-number test; fewer than three nodes enclose nothing.
fn polygon_contains(nodes: &[Vector2<f64>], x: f64, y: f64) -> bool {
    if nodes.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = nodes.len() - 1;
    for (i, a) in nodes.iter().enumerate() {
        let b = &nodes[j];
        if (a.y > y) != (b.y > y) && x < (b.x - a.x) * (y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f64, y: f64, z: f64) -> Vector3<f64> {
        Vector3::new(x, y, z)
    }

    fn unit_square() -> Mask {
        Mask::Polygon {
            nodes: vec![
                Vector2::new(0.0, 0.0),
                Vector2::new(1.0, 0.0),
                Vector2::new(1.0, 1.0),
                Vector2::new(0.0, 1.0),
            ],
        }
    }

    #[test]
    fn circle_is_closed_and_ignores_z() {
        let c = Mask::Circle {
            center: Vector2::new(1.0, 1.0),
            radius: 2.0,
        };
        assert!(c.is_inside(&v(3.0, 1.0, -50.0)));
        assert!(!c.is_inside(&v(3.1, 1.0, 0.0)));
    }

    #[test]
    fn extent_corners_are_inclusive() {
        let e = Mask::Extent {
            start: [-1, 2],
            end: [3, 4],
        };
        assert!(e.is_inside(&v(-1.0, 2.0, 0.0)));
        assert!(e.is_inside(&v(3.0, 4.0, 9.0)));
        assert!(!e.is_inside(&v(3.5, 3.0, 0.0)));
    }

    #[test]
    fn polygon_even_odd() {
        let sq = unit_square();
        assert!(sq.is_inside(&v(0.5, 0.5, 0.0)));
        assert!(!sq.is_inside(&v(1.5, 0.5, 0.0)));
        assert!(!sq.is_inside(&v(0.5, -0.5, 0.0)));

        let degenerate = Mask::Polygon {
            nodes: vec![Vector2::new(0.0, 0.0), Vector2::new(1.0, 1.0)],
        };
        assert!(!degenerate.is_inside(&v(0.5, 0.5, 0.0)));
    }

    #[test]
    fn sphere_uses_all_three_axes() {
        let s = Mask::Sphere {
            origin: v(0.0, 0.0, 0.0),
            radius: 1.0,
        };
        assert!(s.is_inside(&v(0.0, 0.0, 1.0)));
        assert!(!s.is_inside(&v(0.0, 0.8, 0.8)));
    }

    #[test]
    fn composite_and_invert() {
        let disk = Mask::Circle {
            center: Vector2::new(0.0, 0.0),
            radius: 1.0,
        };
        let xor = Mask::composite(CompositeOp::Xor, disk.clone(), unit_square());
        assert!(xor.is_inside(&v(-0.5, 0.0, 0.0)));
        assert!(!xor.is_inside(&v(0.5, 0.5, 0.0)));
        assert!(xor.is_inside(&v(0.9, 0.9, 0.0)));

        let and = Mask::composite(CompositeOp::And, disk.clone(), unit_square());
        assert!(and.is_inside(&v(0.5, 0.5, 0.0)));
        assert!(!Mask::invert(and).is_inside(&v(0.5, 0.5, 0.0)));
    }

    #[test]
    fn operator_spelling_round_trips() {
        for op in [CompositeOp::And, CompositeOp::Or, CompositeOp::Xor] {
            assert_eq!(op.as_str().parse::<CompositeOp>(), Ok(op));
        }
        assert_eq!("NAND".parse::<CompositeOp>(), Err("NAND".to_string()));
    }
}
