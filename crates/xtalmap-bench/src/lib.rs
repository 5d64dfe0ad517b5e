//! Benchmark profiles for the xtalmap map engine.
//!
//! - [`reference_crystal`]: a P2₁ crystal on a cubic cell, half-cell ASU
//! - [`probe_points`]: deterministic fractional sample positions

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use nalgebra::Vector3;
use xtalmap_core::{Extent, Point, Size};
use xtalmap_xtal::{CrystalConfig, CrystalConfigError, CrystalMap, IntSymOp};

/// A P2₁ crystal on an `n`³ cell (`n` even) with every canonical voxel
/// set to `x + 10y + 100z`.
pub fn reference_crystal(n: u32) -> Result<CrystalMap, CrystalConfigError> {
    let half = (n / 2) as i32;
    let last = n as i32 - 1;
    let config = CrystalConfig {
        unit_cell: Extent::at_origin(Size::cube(n)),
        asu: Extent::new(Point::ORIGIN, Point::new(half, last, last)),
        symops: vec![
            IntSymOp::IDENTITY,
            IntSymOp::new([[-1, 0, 0], [0, 1, 0], [0, 0, -1]], Point::new(0, half, 0)),
        ],
    };
    let mut xtal = CrystalMap::new(config)?;
    for p in xtal.asu_extent().points() {
        if xtal.is_canonical(p) {
            xtal.set_real(p, (p.x + 10 * p.y + 100 * p.z) as f32);
        }
    }
    Ok(xtal)
}

/// `count` pixel positions inside `extent`, spread by a multiplicative
/// hash of their index.
pub fn probe_points(extent: Extent, count: usize) -> Vec<Vector3<f64>> {
    let start = extent.start();
    let size = extent.size();
    let span = |axis: usize| f64::from(size.component(axis).saturating_sub(1));
    (0..count as u64)
        .map(|i| {
            let frac = |mul: u64| (i.wrapping_mul(mul) % 10_007) as f64 / 10_007.0;
            Vector3::new(
                f64::from(start.x) + frac(6_364_136_223_846_793_007) * span(0),
                f64::from(start.y) + frac(1_442_695_040_888_963_407) * span(1),
                f64::from(start.z) + frac(2_862_933_555_777_941_757) * span(2),
            )
        })
        .collect()
}
