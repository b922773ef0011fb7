//! Linear convolution filters: generic kernel, Box Blur, Gaussian, Motion Blur.
//!
//! Each output channel is the kernel-weighted sum of the `size × size`
//! neighborhood around the pixel, clamped to 0-255. Neighbors outside the
//! image replicate the nearest edge pixel.

use super::core::Kernel;
use super::PixelFilter;
use crate::raster::{PixelBuffer, Rgb, RgbImage};

/// Kernel-weighted neighborhood sum per channel, before clamping.
///
/// Offset `(i, j)` reads the source at `(x + j, y + i)`.
#[inline]
pub fn convolve(image: &RgbImage, kernel: &Kernel, x: usize, y: usize) -> [f32; 3] {
    let mut acc = [0.0f32; 3];
    for (i, j, weight) in kernel.offsets() {
        if weight == 0.0 {
            continue;
        }
        let src = image.get_clamped(x as isize + j, y as isize + i).to_f32();
        for c in 0..3 {
            acc[c] += src[c] * weight;
        }
    }
    acc
}

// ============================================================================
// Generic convolution
// ============================================================================

/// Convolution with an arbitrary kernel, e.g. one read from a kernel file.
#[derive(Clone, Debug)]
pub struct Convolution {
    kernel: Kernel,
}

impl Convolution {
    pub fn new(kernel: Kernel) -> Self {
        Convolution { kernel }
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }
}

impl PixelFilter for Convolution {
    fn compute_pixel(&self, image: &RgbImage, x: usize, y: usize) -> Rgb {
        Rgb::from_f32(convolve(image, &self.kernel, x, y))
    }
}

// ============================================================================
// Box Blur
// ============================================================================

/// Box blur of radius `r`: mean of the `(2r+1)²` neighborhood.
#[derive(Clone, Debug)]
pub struct Blur {
    kernel: Kernel,
}

impl Blur {
    pub fn new(radius: usize) -> Self {
        Blur {
            kernel: Kernel::box_blur(radius),
        }
    }
}

impl Default for Blur {
    fn default() -> Self {
        Blur::new(1)
    }
}

impl PixelFilter for Blur {
    fn compute_pixel(&self, image: &RgbImage, x: usize, y: usize) -> Rgb {
        Rgb::from_f32(convolve(image, &self.kernel, x, y))
    }
}

// ============================================================================
// Gaussian
// ============================================================================

/// Gaussian blur with weights `exp(-(x² + y²) / sigma²)`, normalized.
///
/// # Arguments
/// * `radius` - Kernel radius, side is `2 * radius + 1`
/// * `sigma` - Spread; non-positive values leave the image unchanged
#[derive(Clone, Debug)]
pub struct Gaussian {
    kernel: Kernel,
}

impl Gaussian {
    pub fn new(radius: usize, sigma: f32) -> Self {
        Gaussian {
            kernel: Kernel::gaussian(radius, sigma),
        }
    }
}

impl Default for Gaussian {
    fn default() -> Self {
        Gaussian::new(2, 3.0)
    }
}

impl PixelFilter for Gaussian {
    fn compute_pixel(&self, image: &RgbImage, x: usize, y: usize) -> Rgb {
        Rgb::from_f32(convolve(image, &self.kernel, x, y))
    }
}

// ============================================================================
// Motion Blur
// ============================================================================

/// Diagonal motion blur: averages the `2r+1` pixels along the main diagonal.
#[derive(Clone, Debug)]
pub struct MotionBlur {
    kernel: Kernel,
}

impl MotionBlur {
    pub fn new(radius: usize) -> Self {
        MotionBlur {
            kernel: Kernel::motion_blur(radius),
        }
    }
}

impl Default for MotionBlur {
    fn default() -> Self {
        MotionBlur::new(4)
    }
}

impl PixelFilter for MotionBlur {
    fn compute_pixel(&self, image: &RgbImage, x: usize, y: usize) -> Rgb {
        Rgb::from_f32(convolve(image, &self.kernel, x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::Filter;

    fn center_dot() -> RgbImage {
        let mut img = RgbImage::new(3, 3);
        img.set(1, 1, Rgb::WHITE);
        img
    }

    #[test]
    fn test_blur_center_dot() {
        let out = Blur::new(1).apply(&center_dot());
        // 255 / 9 = 28.33
        assert_eq!(out.get(1, 1), Rgb::gray(28));
    }

    #[test]
    fn test_blur_border_pixels_see_dot_once() {
        let out = Blur::new(1).apply(&center_dot());
        for (_, _, c) in out.pixels() {
            assert_eq!(c, Rgb::gray(28));
        }
    }

    #[test]
    fn test_blur_replicates_edges_instead_of_wrapping() {
        let mut img = RgbImage::new(4, 4);
        img.set(0, 0, Rgb::WHITE);
        let out = Blur::new(1).apply(&img);
        // The corner pixel is sampled four times through clamping: 4 * 255 / 9.
        assert_eq!(out.get(0, 0), Rgb::gray(113));
        // Wrapping would pull the corner into the opposite corner.
        assert_eq!(out.get(3, 3), Rgb::BLACK);
    }

    #[test]
    fn test_blur_constant_image_unchanged() {
        let img = RgbImage::filled(6, 5, Rgb::new(12, 130, 250));
        assert_eq!(Blur::new(2).apply(&img), img);
        assert_eq!(Gaussian::new(2, 3.0).apply(&img), img);
    }

    #[test]
    fn test_gaussian_spreads_less_than_box() {
        let mut img = RgbImage::new(5, 5);
        img.set(2, 2, Rgb::WHITE);
        let gauss = Gaussian::new(1, 1.0).apply(&img);
        let boxed = Blur::new(1).apply(&img);
        assert!(gauss.get(2, 2).r() > boxed.get(2, 2).r());
        assert!(gauss.get(1, 1).r() < boxed.get(1, 1).r());
    }

    #[test]
    fn test_identity_convolution() {
        let img = RgbImage::from_fn(4, 4, |x, y| Rgb::new(x as u8 * 40, y as u8 * 40, 99));
        let mut weights = vec![0.0; 9];
        weights[4] = 1.0;
        let conv = Convolution::new(Kernel::from_weights(3, weights).unwrap());
        assert_eq!(conv.apply(&img), img);
    }

    #[test]
    fn test_motion_blur_diagonal_only() {
        let mut img = RgbImage::new(5, 5);
        img.set(2, 2, Rgb::gray(90));
        let out = MotionBlur::new(1).apply(&img);
        assert_eq!(out.get(1, 1), Rgb::gray(30));
        assert_eq!(out.get(3, 3), Rgb::gray(30));
        assert_eq!(out.get(3, 1), Rgb::BLACK);
    }

    #[test]
    fn test_empty_image() {
        let img = RgbImage::new(0, 3);
        let out = Blur::new(1).apply(&img);
        assert_eq!(out.dimensions(), (0, 3));
    }
}
