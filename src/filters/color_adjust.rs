//! Color adjustment filters: Invert, Brightness.
//!
//! Pixel-wise operations that don't require spatial context.

use super::PixelFilter;
use crate::raster::{PixelBuffer, Rgb, RgbImage};

// ============================================================================
// Invert
// ============================================================================

/// Invert colors: `255 - channel`. Applying it twice restores the input exactly.
#[derive(Clone, Copy, Debug, Default)]
pub struct Invert;

impl PixelFilter for Invert {
    fn compute_pixel(&self, image: &RgbImage, x: usize, y: usize) -> Rgb {
        Rgb(image.get(x, y).0.map(|v| 255 - v))
    }
}

// ============================================================================
// Brightness
// ============================================================================

/// Add a constant offset to every channel, saturating at 0 and 255.
///
/// # Arguments
/// * `k` - Offset in channel units; negative values darken
#[derive(Clone, Copy, Debug)]
pub struct Brightness {
    k: f32,
}

impl Brightness {
    pub fn new(k: f32) -> Self {
        Brightness { k }
    }

    pub fn k(&self) -> f32 {
        self.k
    }
}

impl Default for Brightness {
    fn default() -> Self {
        Brightness::new(50.0)
    }
}

impl PixelFilter for Brightness {
    fn compute_pixel(&self, image: &RgbImage, x: usize, y: usize) -> Rgb {
        Rgb::from_f32(image.get(x, y).to_f32().map(|v| v + self.k))
    }
}
