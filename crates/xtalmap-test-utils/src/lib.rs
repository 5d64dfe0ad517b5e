//! Test fixtures and reference implementations for xtalmap development.
//!
//! Provides ramp-filled maps, small space-group operator sets, a
//! [`RecordingObserver`] for arena notifications and [`NaiveDft`], a slow
//! but obviously correct [`SpectralTransform`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod spacegroups;

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use xtalmap_core::{Extent, Point, Size};
use xtalmap_handle::{MapEvent, MapHandle, MapObserver};
use xtalmap_map::{Complex32, MapState, Spatial, SpectralTransform};

/// Value of the ramp fixture at `p`: `x + 10y + 100z`.
pub fn ramp_value(p: Point) -> f32 {
    (p.x + 10 * p.y + 100 * p.z) as f32
}

/// A real spatial map over `extent` filled with [`ramp_value`].
pub fn ramp_map(extent: Extent) -> MapState<f32, Spatial> {
    let mut m = MapState::new(extent);
    for p in extent.points() {
        m.set_real(p, ramp_value(p));
    }
    m
}

/// A real spatial map filled with deterministic pseudo-random values in
/// `[-1, 1)`.
pub fn noise_map(extent: Extent, seed: u32) -> MapState<f32, Spatial> {
    let mut m = MapState::new(extent);
    let mut s = seed.wrapping_mul(2_654_435_761).wrapping_add(1);
    for p in extent.points() {
        s ^= s << 13;
        s ^= s >> 17;
        s ^= s << 5;
        m.set_real(p, (s % 2000) as f32 / 1000.0 - 1.0);
    }
    m
}

/// Shared log of `(handle, event)` pairs.
pub type EventLog = Rc<RefCell<Vec<(MapHandle, MapEvent)>>>;

/// Observer that appends every event to an [`EventLog`].
pub struct RecordingObserver {
    log: EventLog,
}

impl RecordingObserver {
    /// A new observer and the log it writes to.
    pub fn new() -> (Self, EventLog) {
        let log = EventLog::default();
        (
            Self {
                log: Rc::clone(&log),
            },
            log,
        )
    }

    /// An observer writing to an existing log.
    pub fn with_log(log: &EventLog) -> Self {
        Self {
            log: Rc::clone(log),
        }
    }
}

impl MapObserver for RecordingObserver {
    fn notify(&mut self, handle: MapHandle, event: &MapEvent) {
        self.log.borrow_mut().push((handle, event.clone()));
    }
}

/// Direct-summation DFT over the packed half-spectrum layout.
#[derive(Clone, Copy, Debug, Default)]
pub struct NaiveDft;

fn phase(k: [usize; 3], n: [usize; 3], size: Size) -> f64 {
    let dims = [size.width, size.height, size.depth].map(|d| f64::from(d.max(1)));
    (0..3).map(|i| (k[i] * n[i]) as f64 / dims[i]).sum::<f64>() * TAU
}

impl SpectralTransform for NaiveDft {
    fn forward(&mut self, size: Size, input: &[f32], output: &mut [Complex32]) {
        let (w, h, d) = (size.width as usize, size.height as usize, size.depth as usize);
        let hd = d / 2 + 1;
        for kz in 0..hd {
            for ky in 0..h {
                for kx in 0..w {
                    let (mut re, mut im) = (0.0f64, 0.0f64);
                    for (offset, &v) in input.iter().enumerate() {
                        let n = [offset % w, (offset / w) % h, offset / (w * h)];
                        let a = -phase([kx, ky, kz], n, size);
                        re += f64::from(v) * a.cos();
                        im += f64::from(v) * a.sin();
                    }
                    output[kx + w * (ky + h * kz)] = Complex32::new(re as f32, im as f32);
                }
            }
        }
    }

    fn inverse(&mut self, size: Size, input: &[Complex32], output: &mut [f32]) {
        let (w, h, d) = (size.width as usize, size.height as usize, size.depth as usize);
        let total = (w * h * d) as f64;
        for (offset, out) in output.iter_mut().enumerate() {
            let n = [offset % w, (offset / w) % h, offset / (w * h)];
            let mut acc = 0.0f64;
            for kz in 0..d {
                for ky in 0..h {
                    for kx in 0..w {
                        let v = if kz <= d / 2 {
                            input[kx + w * (ky + h * kz)]
                        } else {
                            let (cx, cy, cz) = ((w - kx) % w, (h - ky) % h, d - kz);
                            input[cx + w * (cy + h * cz)].conj()
                        };
                        let a = phase([kx, ky, kz], n, size);
                        acc += f64::from(v.re) * a.cos() - f64::from(v.im) * a.sin();
                    }
                }
            }
            *out = (acc / total) as f32;
        }
    }
}
