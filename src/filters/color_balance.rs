//! Automatic color balance: Gray World, Perfect Reflector.
//!
//! Two-pass filters. The first pass scans the whole image for per-channel
//! statistics, the second scales each channel by a gain derived from them.
//! Statistics are local to one `apply` call.

use log::{debug, warn};

use super::core::{map_pixels, ChannelStats};
use super::Filter;
use crate::raster::{PixelBuffer, Rgb, RgbImage};

const CHANNEL_NAMES: [&str; 3] = ["red", "green", "blue"];

/// Multiply each channel by its gain, clamping and rounding.
fn apply_gains(image: &RgbImage, gains: [f64; 3]) -> RgbImage {
    map_pixels(image, |x, y| {
        let px = image.get(x, y).to_f32();
        Rgb::from_f32([
            (px[0] as f64 * gains[0]) as f32,
            (px[1] as f64 * gains[1]) as f32,
            (px[2] as f64 * gains[2]) as f32,
        ])
    })
}

// ============================================================================
// Gray World
// ============================================================================

/// Gray-world balance: scale each channel so its mean matches the mean of
/// the three channel means.
///
/// A channel whose mean is zero (entirely black) is left unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct GrayWorld;

impl GrayWorld {
    /// Per-channel gains `avg / avg_channel` for `image`.
    pub fn gains(image: &RgbImage) -> [f64; 3] {
        let means = ChannelStats::scan(image).mean();
        let avg = (means[0] + means[1] + means[2]) / 3.0;
        debug!(
            "gray world: channel means ({:.2}, {:.2}, {:.2}), target {:.2}",
            means[0], means[1], means[2], avg
        );

        let mut gains = [1.0; 3];
        for c in 0..3 {
            if means[c] == 0.0 {
                warn!("gray world: {} channel mean is zero, leaving it unchanged", CHANNEL_NAMES[c]);
            } else {
                gains[c] = avg / means[c];
            }
        }
        gains
    }
}

impl Filter for GrayWorld {
    fn apply(&self, image: &RgbImage) -> RgbImage {
        if image.is_empty() {
            return image.clone();
        }
        apply_gains(image, Self::gains(image))
    }
}

// ============================================================================
// Perfect Reflector
// ============================================================================

/// Perfect-reflector balance: scale each channel so its brightest value
/// becomes 255. A channel whose maximum is zero is left unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct PerfectReflector;

impl PerfectReflector {
    pub fn gains(image: &RgbImage) -> [f64; 3] {
        let stats = ChannelStats::scan(image);
        debug!(
            "perfect reflector: channel maxima ({}, {}, {})",
            stats.max[0], stats.max[1], stats.max[2]
        );

        let mut gains = [1.0; 3];
        for c in 0..3 {
            if stats.max[c] == 0 {
                warn!("perfect reflector: {} channel is black, leaving it unchanged", CHANNEL_NAMES[c]);
            } else {
                gains[c] = 255.0 / stats.max[c] as f64;
            }
        }
        gains
    }
}

impl Filter for PerfectReflector {
    fn apply(&self, image: &RgbImage) -> RgbImage {
        if image.is_empty() {
            return image.clone();
        }
        apply_gains(image, Self::gains(image))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray_world_balanced_is_identity() {
        let img = RgbImage::from_fn(4, 4, |x, y| {
            let v = (x * 50 + y * 10) as u8;
            Rgb::gray(v)
        });
        assert_eq!(GrayWorld.apply(&img), img);
    }

    #[test]
    fn test_gray_world_equalizes_means() {
        let img = RgbImage::filled(3, 3, Rgb::new(60, 120, 180));
        let out = GrayWorld.apply(&img);
        assert_eq!(out.get(1, 1), Rgb::gray(120));
    }

    #[test]
    fn test_gray_world_zero_channel_guarded() {
        let img = RgbImage::filled(2, 2, Rgb::new(0, 90, 180));
        let out = GrayWorld.apply(&img);
        // avg = 90: blue halves, green stays, red untouched instead of NaN.
        assert_eq!(out.get(0, 0), Rgb::new(0, 90, 90));
    }

    #[test]
    fn test_gray_world_no_state_between_calls() {
        let filter = GrayWorld;
        let first = RgbImage::filled(2, 2, Rgb::new(200, 10, 10));
        let second = RgbImage::filled(2, 2, Rgb::new(60, 120, 180));
        let _ = filter.apply(&first);
        assert_eq!(filter.apply(&second), GrayWorld.apply(&second));
        assert_eq!(filter.apply(&second).get(0, 0), Rgb::gray(120));
    }

    #[test]
    fn test_gray_world_empty() {
        let img = RgbImage::new(0, 0);
        assert!(GrayWorld.apply(&img).is_empty());
    }

    #[test]
    fn test_perfect_reflector_stretches_to_white() {
        let img = RgbImage::from_fn(2, 1, |x, _| if x == 0 { Rgb::new(100, 50, 200) } else { Rgb::new(40, 20, 80) });
        let out = PerfectReflector.apply(&img);
        assert_eq!(out.get(0, 0), Rgb::WHITE);
        assert_eq!(out.get(1, 0), Rgb::gray(102));
    }

    #[test]
    fn test_perfect_reflector_black_channel() {
        let img = RgbImage::filled(2, 2, Rgb::new(0, 51, 255));
        let out = PerfectReflector.apply(&img);
        assert_eq!(out.get(1, 1), Rgb::new(0, 255, 255));
    }
}
