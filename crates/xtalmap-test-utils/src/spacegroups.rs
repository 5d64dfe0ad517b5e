//! Small space groups as integer operator sets, with matching ASUs.
//!
//! Every group except P4 maps `x` to `±x`, so the half cell
//! `0 <= x <= N/2` (all of `y` and `z`) contains a representative of every
//! orbit. P4 needs a square cell and the quarter ASU from [`quarter_xy_asu`].

use xtalmap_core::{Extent, Point, Size};
use xtalmap_xtal::{CrystalConfig, IntSymOp};

/// P1: identity only.
pub fn p1() -> Vec<IntSymOp> {
    vec![IntSymOp::IDENTITY]
}

/// P-1: identity and inversion through the origin.
pub fn p_1bar() -> Vec<IntSymOp> {
    vec![
        IntSymOp::IDENTITY,
        IntSymOp::new([[-1, 0, 0], [0, -1, 0], [0, 0, -1]], Point::ORIGIN),
    ]
}

/// P2 (unique axis b): identity and `-x, y, -z`.
pub fn p2() -> Vec<IntSymOp> {
    vec![
        IntSymOp::IDENTITY,
        IntSymOp::new([[-1, 0, 0], [0, 1, 0], [0, 0, -1]], Point::ORIGIN),
    ]
}

/// P2₁ (unique axis b): identity and `-x, y + 1/2, -z` on a grid of
/// `cell` samples. `cell.height` should be even.
pub fn p21(cell: Size) -> Vec<IntSymOp> {
    vec![
        IntSymOp::IDENTITY,
        IntSymOp::new(
            [[-1, 0, 0], [0, 1, 0], [0, 0, -1]],
            Point::new(0, (cell.height / 2) as i32, 0),
        ),
    ]
}

/// P222: identity and the three 2-fold axes through the origin.
pub fn p222() -> Vec<IntSymOp> {
    vec![
        IntSymOp::IDENTITY,
        IntSymOp::new([[-1, 0, 0], [0, -1, 0], [0, 0, 1]], Point::ORIGIN),
        IntSymOp::new([[-1, 0, 0], [0, 1, 0], [0, 0, -1]], Point::ORIGIN),
        IntSymOp::new([[1, 0, 0], [0, -1, 0], [0, 0, -1]], Point::ORIGIN),
    ]
}

/// P4 (axis c): identity, `-y, x, z`, `-x, -y, z` and `y, -x, z`. Only
/// valid on cells with `width == height`.
pub fn p4() -> Vec<IntSymOp> {
    vec![
        IntSymOp::IDENTITY,
        IntSymOp::new([[0, -1, 0], [1, 0, 0], [0, 0, 1]], Point::ORIGIN),
        IntSymOp::new([[-1, 0, 0], [0, -1, 0], [0, 0, 1]], Point::ORIGIN),
        IntSymOp::new([[0, 1, 0], [-1, 0, 0], [0, 0, 1]], Point::ORIGIN),
    ]
}

/// The quarter-cell ASU `0 <= x, y <= N/2` of a cell at the origin.
pub fn quarter_xy_asu(cell: Size) -> Extent {
    Extent::new(
        Point::ORIGIN,
        Point::new(
            (cell.width / 2) as i32,
            (cell.height / 2) as i32,
            cell.depth as i32 - 1,
        ),
    )
}

/// The half-cell ASU `0 <= x <= N/2` of a cell at the origin.
pub fn half_x_asu(cell: Size) -> Extent {
    Extent::new(
        Point::ORIGIN,
        Point::new(
            (cell.width / 2) as i32,
            cell.height as i32 - 1,
            cell.depth as i32 - 1,
        ),
    )
}

/// A crystal config with the unit cell at the origin and the half-cell
/// ASU (the whole cell for P1).
pub fn config(cell: Size, symops: Vec<IntSymOp>) -> CrystalConfig {
    let unit_cell = Extent::at_origin(cell);
    let asu = if symops.len() == 1 {
        unit_cell
    } else {
        half_x_asu(cell)
    };
    CrystalConfig {
        unit_cell,
        asu,
        symops,
    }
}
