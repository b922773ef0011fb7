//! Geometric filters: Translate, Glass, Wave.
//!
//! Each output pixel copies one source pixel from a displaced position.
//! Glass and Wave clamp the displaced position into the image; Translate
//! maps positions outside the image to black.

use std::f32::consts::PI;
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use super::core::bounded_radius;
use super::{Filter, PixelFilter};
use crate::raster::{PixelBuffer, Rgb, RgbImage};

// ============================================================================
// Translate
// ============================================================================

/// Shift content: `out(x, y) = source(x + dx, y + dy)`, black where that
/// falls outside the source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Translate {
    dx: isize,
    dy: isize,
}

impl Translate {
    pub fn new(dx: isize, dy: isize) -> Self {
        Translate { dx, dy }
    }
}

impl Default for Translate {
    fn default() -> Self {
        Translate::new(50, 0)
    }
}

impl PixelFilter for Translate {
    fn compute_pixel(&self, image: &RgbImage, x: usize, y: usize) -> Rgb {
        let sx = (x as isize).checked_add(self.dx);
        let sy = (y as isize).checked_add(self.dy);
        match (sx, sy) {
            (Some(sx), Some(sy)) => image.get_checked(sx, sy).unwrap_or(Rgb::BLACK),
            // Past the end of the coordinate range is past the image too.
            _ => Rgb::BLACK,
        }
    }
}

// ============================================================================
// Glass
// ============================================================================

/// Frosted-glass effect: each pixel copies a randomly jittered neighbor.
///
/// Jitter is uniform in `[-radius, radius)` on each axis, drawn from the
/// filter's random source in row-major order. [`Glass::new`] seeds from the
/// OS (feature `os_rng`), so results differ between runs; use
/// [`Glass::seeded`] or [`Glass::with_rng`] for reproducible output. Because
/// jitter draws are sequential, this filter does not parallelise its traversal.
pub struct Glass {
    radius: i32,
    rng: Mutex<Box<dyn RngCore + Send>>,
}

impl Glass {
    #[cfg(feature = "os_rng")]
    pub fn new(radius: usize) -> Self {
        Self::with_rng(radius, StdRng::from_os_rng())
    }

    pub fn seeded(radius: usize, seed: u64) -> Self {
        Self::with_rng(radius, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng<R: RngCore + Send + 'static>(radius: usize, rng: R) -> Self {
        Glass {
            // Bounded well inside i32.
            radius: bounded_radius(radius) as i32,
            rng: Mutex::new(Box::new(rng)),
        }
    }

    pub fn radius(&self) -> usize {
        self.radius as usize
    }
}

#[cfg(feature = "os_rng")]
impl Default for Glass {
    fn default() -> Self {
        Glass::new(5)
    }
}

impl std::fmt::Debug for Glass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Glass").field("radius", &self.radius).finish_non_exhaustive()
    }
}

impl Filter for Glass {
    fn apply(&self, image: &RgbImage) -> RgbImage {
        let (width, height) = image.dimensions();
        let mut output = RgbImage::new(width, height);
        if image.is_empty() {
            return output;
        }

        // A panic elsewhere cannot leave the generator half-updated.
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        for y in 0..height {
            for x in 0..width {
                let (jx, jy) = if self.radius == 0 {
                    (0, 0)
                } else {
                    (
                        rng.random_range(-self.radius..self.radius) as isize,
                        rng.random_range(-self.radius..self.radius) as isize,
                    )
                };
                let sx = (x as isize).saturating_add(jx);
                let sy = (y as isize).saturating_add(jy);
                output.set(x, y, image.get_clamped(sx, sy));
            }
        }
        output
    }
}

// ============================================================================
// Wave
// ============================================================================

/// Horizontal wave: `out(x, y) = source(x + A·sin(2πx / T), y)`.
///
/// The displaced column is rounded and clamped into the image. A non-positive
/// period leaves the image unchanged.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wave {
    amplitude: f32,
    period: f32,
}

impl Wave {
    pub fn new(amplitude: f32, period: f32) -> Self {
        Wave { amplitude, period }
    }

    fn source_x(&self, x: usize) -> isize {
        if self.period <= 0.0 {
            return x as isize;
        }
        let shift = self.amplitude * (2.0 * PI * x as f32 / self.period).sin();
        (x as f32 + shift).round() as isize
    }
}

impl Default for Wave {
    fn default() -> Self {
        Wave::new(20.0, 30.0)
    }
}

impl PixelFilter for Wave {
    fn compute_pixel(&self, image: &RgbImage, x: usize, y: usize) -> Rgb {
        image.get_clamped(self.source_x(x), y as isize)
    }
}
