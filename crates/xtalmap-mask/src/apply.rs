//! Applying a mask to a map.

use crate::mask::Mask;
use nalgebra::Vector3;
use tracing::debug;
use xtalmap_map::AnyMap;

/// Set every stored point of `map` whose pixel coordinate lies outside
/// `mask` to `outside`. Returns the number of points written.
pub fn apply_mask(map: &mut AnyMap, mask: &Mask, outside: f32) -> usize {
    let mut written = 0;
    for p in map.points() {
        let pixel = Vector3::new(f64::from(p.x), f64::from(p.y), f64::from(p.z));
        if !mask.is_inside(&pixel) && map.set_real(p, outside) {
            written += 1;
        }
    }
    debug!(kind = %map.kind(), written, "mask applied");
    written
}
