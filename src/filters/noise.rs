//! Median filter.
//!
//! Removes salt-and-pepper noise while preserving edges. Each channel is
//! ranked independently, so the output color need not appear in the input.

use super::core::{bounded_radius, map_pixels_with};
use super::Filter;
use crate::raster::{PixelBuffer, Rgb, RgbImage};

/// Median filter over a `(2r+1)²` neighborhood with replicate-edge borders.
///
/// # Arguments
/// * `radius` - Filter radius; only values above
///   [`MAX_RADIUS`](super::core::MAX_RADIUS) are reduced, with a warning
#[derive(Clone, Copy, Debug)]
pub struct Median {
    radius: usize,
}

impl Median {
    pub fn new(radius: usize) -> Self {
        Median {
            radius: bounded_radius(radius),
        }
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    fn window_len(&self) -> usize {
        let size = 2 * self.radius + 1;
        size * size
    }
}

impl Default for Median {
    fn default() -> Self {
        Median::new(1)
    }
}

impl Filter for Median {
    fn apply(&self, image: &RgbImage) -> RgbImage {
        let r = self.radius as isize;
        let window = self.window_len();

        // One sample buffer per worker, reused for every pixel and channel.
        map_pixels_with(
            image,
            || Vec::<u8>::with_capacity(window),
            |values, x, y| {
                let mut out = [0u8; 3];
                for (c, slot) in out.iter_mut().enumerate() {
                    values.clear();
                    for dy in -r..=r {
                        for dx in -r..=r {
                            let px = image.get_clamped(x as isize + dx, y as isize + dy);
                            values.push(px.0[c]);
                        }
                    }
                    let mid = values.len() / 2;
                    let (_, median, _) = values.select_nth_unstable(mid);
                    *slot = *median;
                }
                Rgb(out)
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_constant_image() {
        let img = RgbImage::filled(6, 4, Rgb::new(12, 34, 56));
        assert_eq!(Median::new(2).apply(&img), img);
    }

    #[test]
    fn test_median_removes_salt() {
        let mut img = RgbImage::filled(5, 5, Rgb::gray(100));
        img.set(2, 2, Rgb::WHITE);
        img.set(0, 4, Rgb::BLACK);
        let out = Median::new(1).apply(&img);
        assert_eq!(out, RgbImage::filled(5, 5, Rgb::gray(100)));
    }

    #[test]
    fn test_median_per_channel() {
        // Row of three pixels; the center's median takes each channel separately.
        let img = RgbImage::from_fn(3, 1, |x, _| match x {
            0 => Rgb::new(10, 200, 30),
            1 => Rgb::new(20, 100, 10),
            _ => Rgb::new(30, 0, 20),
        });
        let out = Median::new(1).apply(&img);
        // Neighborhood rows replicate: each column contributes three samples.
        assert_eq!(out.get(1, 0), Rgb::new(20, 100, 20));
    }

    #[test]
    fn test_median_preserves_step_edge() {
        let img = RgbImage::from_fn(6, 6, |x, _| if x >= 3 { Rgb::WHITE } else { Rgb::BLACK });
        assert_eq!(Median::new(1).apply(&img), img);
    }

    /// Straightforward per-pixel median with the same replicate-edge rule.
    fn naive_median(image: &RgbImage, radius: usize) -> RgbImage {
        let r = radius as isize;
        RgbImage::from_fn(image.width(), image.height(), |x, y| {
            let mut out = [0u8; 3];
            for (c, slot) in out.iter_mut().enumerate() {
                let mut values = Vec::new();
                for dy in -r..=r {
                    for dx in -r..=r {
                        values.push(image.get_clamped(x as isize + dx, y as isize + dy).0[c]);
                    }
                }
                values.sort_unstable();
                *slot = values[values.len() / 2];
            }
            Rgb(out)
        })
    }

    #[test]
    fn test_median_honours_large_radius() {
        let img = RgbImage::from_fn(14, 11, |x, y| {
            Rgb::new((x * 37 + y * 11) as u8, (x * 5 + y * 53) as u8, (x * y * 7) as u8)
        });
        let median = Median::new(25);
        assert_eq!(median.radius(), 25);
        assert_eq!(median.apply(&img), naive_median(&img, 25));
    }

    #[test]
    fn test_median_matches_naive_small_radius() {
        let img = RgbImage::from_fn(9, 7, |x, y| Rgb::new((x * 29) as u8, (y * 31) as u8, ((x + y) * 13) as u8));
        assert_eq!(Median::new(2).apply(&img), naive_median(&img, 2));
    }

    #[test]
    fn test_median_radius_beyond_limit_is_capped() {
        assert_eq!(Median::new(usize::MAX).radius(), crate::filters::core::MAX_RADIUS);
    }
}
