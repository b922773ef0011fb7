//! Edge filters: Sharpen, Sobel.
//!
//! Both are fixed 3×3 convolutions with replicate-edge boundaries. Sobel is
//! computed per channel, so colored edges keep their hue.

use super::blur::convolve;
use super::core::Kernel;
use super::PixelFilter;
use crate::raster::{Rgb, RgbImage};

// ============================================================================
// Sharpen
// ============================================================================

/// Sharpen with `[[0,-1,0],[-1,5,-1],[0,-1,0]]`. Flat regions are unchanged.
#[derive(Clone, Debug)]
pub struct Sharpen {
    kernel: Kernel,
}

impl Sharpen {
    pub fn new() -> Self {
        Sharpen {
            kernel: Kernel::sharpen(),
        }
    }
}

impl Default for Sharpen {
    fn default() -> Self {
        Sharpen::new()
    }
}

impl PixelFilter for Sharpen {
    fn compute_pixel(&self, image: &RgbImage, x: usize, y: usize) -> Rgb {
        Rgb::from_f32(convolve(image, &self.kernel, x, y))
    }
}

// ============================================================================
// Sobel
// ============================================================================

/// Which gradient a [`Sobel`] filter reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SobelDirection {
    /// Horizontal gradient only, as a plain weighted sum (negative responses clamp to 0).
    Horizontal,
    /// Vertical gradient only, as a plain weighted sum.
    Vertical,
    /// `sqrt(Gx² + Gy²)`.
    #[default]
    Magnitude,
}

/// Sobel edge detection.
///
/// The default reports gradient magnitude. The single-axis modes reproduce
/// the historical one-kernel output for callers that depend on it.
#[derive(Clone, Debug)]
pub struct Sobel {
    direction: SobelDirection,
    gx: Kernel,
    gy: Kernel,
}

impl Sobel {
    pub fn new(direction: SobelDirection) -> Self {
        Sobel {
            direction,
            gx: Kernel::sobel_x(),
            gy: Kernel::sobel_y(),
        }
    }

    pub fn direction(&self) -> SobelDirection {
        self.direction
    }
}

impl Default for Sobel {
    fn default() -> Self {
        Sobel::new(SobelDirection::Magnitude)
    }
}

impl PixelFilter for Sobel {
    fn compute_pixel(&self, image: &RgbImage, x: usize, y: usize) -> Rgb {
        match self.direction {
            SobelDirection::Horizontal => Rgb::from_f32(convolve(image, &self.gx, x, y)),
            SobelDirection::Vertical => Rgb::from_f32(convolve(image, &self.gy, x, y)),
            SobelDirection::Magnitude => {
                let gx = convolve(image, &self.gx, x, y);
                let gy = convolve(image, &self.gy, x, y);
                let mut mag = [0.0f32; 3];
                for c in 0..3 {
                    mag[c] = (gx[c] * gx[c] + gy[c] * gy[c]).sqrt();
                }
                Rgb::from_f32(mag)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{Filter, Invert};
    use crate::raster::PixelBuffer;

    /// Left half black, right half `level`.
    fn vertical_step(level: u8) -> RgbImage {
        RgbImage::from_fn(6, 4, |x, _| if x >= 3 { Rgb::gray(level) } else { Rgb::BLACK })
    }

    #[test]
    fn test_sharpen_preserves_flat() {
        let img = RgbImage::filled(4, 4, Rgb::new(90, 120, 200));
        assert_eq!(Sharpen::new().apply(&img), img);
    }

    #[test]
    fn test_sharpen_isolated_dot() {
        let mut img = RgbImage::filled(3, 3, Rgb::gray(10));
        img.set(1, 1, Rgb::gray(50));
        let out = Sharpen::new().apply(&img);
        // 5 * 50 - 4 * 10
        assert_eq!(out.get(1, 1), Rgb::gray(210));
    }

    #[test]
    fn test_sobel_flat_is_zero() {
        let img = RgbImage::filled(5, 5, Rgb::gray(77));
        let out = Sobel::default().apply(&img);
        assert_eq!(out, RgbImage::filled(5, 5, Rgb::BLACK));
    }

    #[test]
    fn test_sobel_magnitude_detects_vertical_edge() {
        let out = Sobel::default().apply(&vertical_step(50));
        // Gx = 4 * 50 across the edge, Gy = 0
        assert_eq!(out.get(2, 1), Rgb::gray(200));
        assert_eq!(out.get(3, 1), Rgb::gray(200));
        assert_eq!(out.get(0, 1), Rgb::BLACK);
        assert_eq!(out.get(5, 1), Rgb::BLACK);
    }

    #[test]
    fn test_sobel_magnitude_is_orientation_independent() {
        let img = vertical_step(50);
        let transposed = RgbImage::from_fn(4, 6, |x, y| img.get(y, x));
        let a = Sobel::default().apply(&img);
        let b = Sobel::default().apply(&transposed);
        assert_eq!(a.get(2, 1), b.get(1, 2));
    }

    #[test]
    fn test_sobel_single_axis_modes() {
        let img = vertical_step(50);
        let h = Sobel::new(SobelDirection::Horizontal).apply(&img);
        let v = Sobel::new(SobelDirection::Vertical).apply(&img);
        assert_eq!(h.get(2, 1), Rgb::gray(200));
        assert_eq!(v.get(2, 1), Rgb::BLACK);

        // Falling edge gives a negative weighted sum, which clamps to black.
        let falling = Invert.apply(&vertical_step(255));
        let h = Sobel::new(SobelDirection::Horizontal).apply(&falling);
        assert_eq!(h.get(2, 1), Rgb::BLACK);
        let m = Sobel::default().apply(&falling);
        assert_eq!(m.get(2, 1), Rgb::WHITE);
    }
}
