//! Synthetic images shared by the integration tests.

use kernel_filters::raster::{Rgb, RgbImage};

/// Deterministic, non-trivial test pattern.
pub fn pattern(width: usize, height: usize) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb::new(
            ((x * 37 + y * 11) % 256) as u8,
            ((x * 5 + y * 53) % 256) as u8,
            ((x * y * 7 + 13) % 256) as u8,
        )
    })
}

/// Flat image with a single dark pixel at `(px, py)`.
#[allow(dead_code)]
pub fn pit(width: usize, height: usize, px: usize, py: usize, background: Rgb) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        if (x, y) == (px, py) {
            Rgb::BLACK
        } else {
            background
        }
    })
}
