//! Auto levels: linear histogram stretch.
//!
//! Pass 1 finds each channel's minimum and maximum; pass 2 maps that range
//! linearly onto 0-255. Each channel is stretched independently.

use log::{debug, warn};

use super::core::{map_pixels, ChannelStats};
use super::Filter;
use crate::raster::{PixelBuffer, Rgb, RgbImage};

/// Per-channel input range found by the scanning pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelRange {
    pub min: [u8; 3],
    pub max: [u8; 3],
}

impl LevelRange {
    pub fn scan(image: &RgbImage) -> Self {
        let stats = ChannelStats::scan(image);
        LevelRange {
            min: stats.min,
            max: stats.max,
        }
    }

    /// Stretch one channel value. A constant channel (`min == max`) keeps its value.
    #[inline]
    pub fn stretch(&self, c: usize, v: u8) -> u8 {
        let (lo, hi) = (self.min[c], self.max[c]);
        if hi <= lo {
            return v;
        }
        let scaled = (v as f32 - lo as f32) * 255.0 / (hi - lo) as f32;
        super::core::to_channel(scaled)
    }
}

/// Linear stretch of each channel's `[min, max]` to `[0, 255]`.
#[derive(Clone, Copy, Debug, Default)]
pub struct AutoLevels;

impl Filter for AutoLevels {
    fn apply(&self, image: &RgbImage) -> RgbImage {
        if image.is_empty() {
            return image.clone();
        }

        let range = LevelRange::scan(image);
        debug!(
            "auto levels: min ({}, {}, {}), max ({}, {}, {})",
            range.min[0], range.min[1], range.min[2], range.max[0], range.max[1], range.max[2]
        );
        for c in 0..3 {
            if range.min[c] == range.max[c] {
                warn!("auto levels: channel {c} is constant ({}), left unchanged", range.min[c]);
            }
        }

        map_pixels(image, |x, y| {
            let px = image.get(x, y).0;
            Rgb([
                range.stretch(0, px[0]),
                range.stretch(1, px[1]),
                range.stretch(2, px[2]),
            ])
        })
    }
}
