//! Morphology filters: Dilation, Erosion, Opening, Closing, Gradient.
//!
//! Grayscale morphology applied to each channel independently over the
//! structuring element's `size × size` neighborhood. Neighbors outside the
//! image replicate the nearest edge pixel, so borders neither grow nor shrink
//! toward an implied black frame.
//!
//! ## Structuring element
//!
//! Each offset with a non-zero weight contributes `channel × weight`. With the
//! default flat element (all ones) dilation is the neighborhood maximum and
//! erosion the neighborhood minimum. Zero weights mark offsets outside the
//! element's shape.

use super::core::{map_pixels, Kernel};
use super::{Filter, PixelFilter};
use crate::raster::{PixelBuffer, Rgb, RgbImage};

#[inline]
fn rank(image: &RgbImage, element: &Kernel, x: usize, y: usize, init: f32, pick: fn(f32, f32) -> f32) -> Rgb {
    let mut acc = [init; 3];
    for (i, j, weight) in element.offsets() {
        if weight == 0.0 {
            continue;
        }
        let src = image.get_clamped(x as isize + j, y as isize + i).to_f32();
        for c in 0..3 {
            acc[c] = pick(acc[c], src[c] * weight);
        }
    }
    Rgb::from_f32(acc)
}

// ============================================================================
// Dilate
// ============================================================================

/// Dilation: bright regions grow, dark regions shrink.
#[derive(Clone, Debug)]
pub struct Dilation {
    element: Kernel,
}

impl Dilation {
    /// Flat square element of side `2 * radius + 1`.
    pub fn new(radius: usize) -> Self {
        Self::with_element(Kernel::structuring_element(radius))
    }

    pub fn with_element(element: Kernel) -> Self {
        Dilation { element }
    }
}

impl Default for Dilation {
    fn default() -> Self {
        Dilation::new(1)
    }
}

impl PixelFilter for Dilation {
    fn compute_pixel(&self, image: &RgbImage, x: usize, y: usize) -> Rgb {
        rank(image, &self.element, x, y, 0.0, f32::max)
    }
}

// ============================================================================
// Erode
// ============================================================================

/// Erosion: dark regions grow, bright regions shrink.
#[derive(Clone, Debug)]
pub struct Erosion {
    element: Kernel,
}

impl Erosion {
    pub fn new(radius: usize) -> Self {
        Self::with_element(Kernel::structuring_element(radius))
    }

    pub fn with_element(element: Kernel) -> Self {
        Erosion { element }
    }
}

impl Default for Erosion {
    fn default() -> Self {
        Erosion::new(1)
    }
}

impl PixelFilter for Erosion {
    fn compute_pixel(&self, image: &RgbImage, x: usize, y: usize) -> Rgb {
        rank(image, &self.element, x, y, 255.0, f32::min)
    }
}

// ============================================================================
// Opening / Closing
// ============================================================================

/// Opening: erosion, then dilation of the eroded image.
///
/// Removes bright specks smaller than the element while keeping larger shapes.
#[derive(Clone, Debug)]
pub struct Opening {
    erosion: Erosion,
    dilation: Dilation,
}

impl Opening {
    pub fn new(radius: usize) -> Self {
        Self::with_element(Kernel::structuring_element(radius))
    }

    pub fn with_element(element: Kernel) -> Self {
        Opening {
            erosion: Erosion::with_element(element.clone()),
            dilation: Dilation::with_element(element),
        }
    }
}

impl Default for Opening {
    fn default() -> Self {
        Opening::new(1)
    }
}

impl Filter for Opening {
    fn apply(&self, image: &RgbImage) -> RgbImage {
        let eroded = self.erosion.apply(image);
        self.dilation.apply(&eroded)
    }
}

/// Closing: dilation, then erosion of the dilated image.
///
/// Fills dark pits and gaps smaller than the element.
#[derive(Clone, Debug)]
pub struct Closing {
    dilation: Dilation,
    erosion: Erosion,
}

impl Closing {
    pub fn new(radius: usize) -> Self {
        Self::with_element(Kernel::structuring_element(radius))
    }

    pub fn with_element(element: Kernel) -> Self {
        Closing {
            dilation: Dilation::with_element(element.clone()),
            erosion: Erosion::with_element(element),
        }
    }
}

impl Default for Closing {
    fn default() -> Self {
        Closing::new(1)
    }
}

impl Filter for Closing {
    fn apply(&self, image: &RgbImage) -> RgbImage {
        let dilated = self.dilation.apply(image);
        self.erosion.apply(&dilated)
    }
}

// ============================================================================
// Gradient
// ============================================================================

/// Morphological gradient: `dilation(image) - erosion(image)` per channel.
///
/// Both passes read the same untouched source; the result outlines edges.
#[derive(Clone, Debug)]
pub struct Gradient {
    dilation: Dilation,
    erosion: Erosion,
}

impl Gradient {
    pub fn new(radius: usize) -> Self {
        Self::with_element(Kernel::structuring_element(radius))
    }

    pub fn with_element(element: Kernel) -> Self {
        Gradient {
            dilation: Dilation::with_element(element.clone()),
            erosion: Erosion::with_element(element),
        }
    }
}

impl Default for Gradient {
    fn default() -> Self {
        Gradient::new(1)
    }
}

impl Filter for Gradient {
    fn apply(&self, image: &RgbImage) -> RgbImage {
        let dilated = self.dilation.apply(image);
        let eroded = self.erosion.apply(image);
        map_pixels(image, |x, y| {
            let d = dilated.get(x, y).0;
            let e = eroded.get(x, y).0;
            Rgb([
                d[0].saturating_sub(e[0]),
                d[1].saturating_sub(e[1]),
                d[2].saturating_sub(e[2]),
            ])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dot(size: usize, background: Rgb, at: (usize, usize), color: Rgb) -> RgbImage {
        let mut img = RgbImage::filled(size, size, background);
        img.set(at.0, at.1, color);
        img
    }

    #[test]
    fn test_dilate_grows_bright() {
        let img = dot(5, Rgb::BLACK, (2, 2), Rgb::new(255, 0, 0));
        let out = Dilation::new(1).apply(&img);
        for y in 1..=3 {
            for x in 1..=3 {
                assert_eq!(out.get(x, y), Rgb::new(255, 0, 0));
            }
        }
        assert_eq!(out.get(0, 0), Rgb::BLACK);
        assert_eq!(out.get(4, 2), Rgb::BLACK);
    }

    #[test]
    fn test_erode_shrinks_bright() {
        let img = dot(5, Rgb::WHITE, (2, 2), Rgb::BLACK);
        let out = Erosion::new(1).apply(&img);
        assert_eq!(out.get(1, 1), Rgb::BLACK);
        assert_eq!(out.get(3, 2), Rgb::BLACK);
        assert_eq!(out.get(0, 0), Rgb::WHITE);
    }

    #[test]
    fn test_erode_border_not_darkened() {
        // Replicate-edge boundary: a white image stays white at its borders.
        let img = RgbImage::filled(4, 3, Rgb::WHITE);
        assert_eq!(Erosion::new(2).apply(&img), img);
    }

    #[test]
    fn test_shaped_element_ignores_zero_weights() {
        // Plus-shaped element: diagonals are not part of it.
        let plus = Kernel::from_weights(3, vec![0.0, 1.0, 0.0, 1.0, 1.0, 1.0, 0.0, 1.0, 0.0]).unwrap();
        let img = dot(5, Rgb::BLACK, (2, 2), Rgb::WHITE);
        let out = Dilation::with_element(plus.clone()).apply(&img);
        assert_eq!(out.get(2, 1), Rgb::WHITE);
        assert_eq!(out.get(1, 1), Rgb::BLACK);

        let img = dot(5, Rgb::WHITE, (2, 2), Rgb::BLACK);
        let out = Erosion::with_element(plus).apply(&img);
        assert_eq!(out.get(1, 2), Rgb::BLACK);
        assert_eq!(out.get(1, 1), Rgb::WHITE);
    }

    #[test]
    fn test_opening_removes_bright_speck() {
        let img = dot(7, Rgb::gray(40), (3, 3), Rgb::WHITE);
        let out = Opening::new(1).apply(&img);
        assert_eq!(out, RgbImage::filled(7, 7, Rgb::gray(40)));
    }

    #[test]
    fn test_opening_keeps_large_shape() {
        let img = RgbImage::from_fn(9, 9, |x, y| {
            if (2..=6).contains(&x) && (2..=6).contains(&y) {
                Rgb::WHITE
            } else {
                Rgb::BLACK
            }
        });
        assert_eq!(Opening::new(1).apply(&img), img);
    }

    #[test]
    fn test_closing_fills_dark_pit() {
        let img = dot(7, Rgb::gray(200), (3, 3), Rgb::BLACK);
        let out = Closing::new(1).apply(&img);
        assert_eq!(out.get(3, 3), Rgb::gray(200));
        assert_eq!(out, RgbImage::filled(7, 7, Rgb::gray(200)));
    }

    #[test]
    fn test_closing_never_darkens() {
        let img = RgbImage::from_fn(6, 6, |x, y| Rgb::new((x * 40) as u8, (y * 40) as u8, ((x * y) % 7 * 30) as u8));
        let out = Closing::new(1).apply(&img);
        for (x, y, c) in img.pixels() {
            let o = out.get(x, y);
            for ch in 0..3 {
                assert!(o.0[ch] >= c.0[ch]);
            }
        }
    }

    #[test]
    fn test_order_matters() {
        let img = dot(7, Rgb::gray(40), (3, 3), Rgb::WHITE);
        let opened = Opening::new(1).apply(&img);
        let closed = Closing::new(1).apply(&img);
        assert_ne!(opened, closed);
    }

    #[test]
    fn test_gradient_outlines_edges() {
        let img = RgbImage::from_fn(6, 1, |x, _| if x >= 3 { Rgb::gray(100) } else { Rgb::gray(20) });
        let out = Gradient::new(1).apply(&img);
        assert_eq!(out.get(0, 0), Rgb::BLACK);
        assert_eq!(out.get(2, 0), Rgb::gray(80));
        assert_eq!(out.get(3, 0), Rgb::gray(80));
        assert_eq!(out.get(5, 0), Rgb::BLACK);
    }

    #[test]
    fn test_gradient_uses_unmodified_source() {
        let img = dot(5, Rgb::BLACK, (2, 2), Rgb::WHITE);
        let out = Gradient::new(1).apply(&img);
        // Chained passes would erode the dilated dot back; independent passes do not.
        assert_eq!(out.get(2, 2), Rgb::WHITE);
        assert_eq!(out.get(1, 1), Rgb::WHITE);
        assert_eq!(out.get(0, 0), Rgb::BLACK);
    }
}
