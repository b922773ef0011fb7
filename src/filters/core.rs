//! Core utilities shared by the filters.
//!
//! This module provides:
//! - Range clamping for channel saturation and coordinate boundaries
//! - The square [`Kernel`] weight matrix and its standard constructors
//! - The parallel per-pixel traversal used by every [`PixelFilter`](super::PixelFilter)
//! - Whole-image per-channel statistics for the two-pass filters

use ndarray::Axis;
use rayon::prelude::*;
use std::ops::Index;

use crate::error::KernelError;
use crate::raster::{PixelBuffer, Rgb, RgbImage};

/// Clamp `value` into `[min, max]`.
///
/// Works for any partially ordered type, so the same helper saturates float
/// channel sums and bounds signed pixel coordinates.
#[inline]
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Round and saturate a float channel value into a stored `u8` channel.
#[inline]
pub fn to_channel(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    clamp(v.round(), 0.0, 255.0) as u8
}

/// Largest neighborhood radius any filter accepts. Windows of side
/// `2 * MAX_RADIUS + 1` keep every offset and sample count far from overflow.
pub const MAX_RADIUS: usize = 1024;

/// Cap `radius` at [`MAX_RADIUS`], warning when a request is reduced.
pub fn bounded_radius(radius: usize) -> usize {
    if radius > MAX_RADIUS {
        log::warn!("radius {radius} exceeds the supported maximum, using {MAX_RADIUS}");
        MAX_RADIUS
    } else {
        radius
    }
}

// ============================================================================
// Kernel
// ============================================================================

/// Square weight matrix of side `2 * radius + 1`, stored row-major.
///
/// The weight for offset `(i, j)` relative to the center (`i` rows, `j`
/// columns) lives at `(i + radius) * size + (j + radius)`. Kernels are plain
/// values: cloning copies the weights.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    radius: usize,
    weights: Vec<f32>,
}

impl Kernel {
    /// All-zero kernel of the given radius.
    pub fn new(radius: usize) -> Self {
        Self::filled(radius, 0.0)
    }

    /// Kernel with every weight equal to `value`. The radius is capped at [`MAX_RADIUS`].
    pub fn filled(radius: usize, value: f32) -> Self {
        let radius = bounded_radius(radius);
        let size = 2 * radius + 1;
        Kernel {
            radius,
            weights: vec![value; size * size],
        }
    }

    /// Build a kernel from row-major weights; `weights.len()` must be an odd square.
    pub fn from_weights(size: usize, weights: Vec<f32>) -> Result<Self, KernelError> {
        if size % 2 == 0 {
            return Err(KernelError::EvenSize(size));
        }
        if size.checked_mul(size) != Some(weights.len()) {
            return Err(KernelError::WeightCount {
                size,
                expected: size.saturating_mul(size),
                got: weights.len(),
            });
        }
        Ok(Kernel {
            radius: size / 2,
            weights,
        })
    }

    /// Box blur: every weight is `1 / size²`.
    pub fn box_blur(radius: usize) -> Self {
        let mut kernel = Self::filled(radius, 1.0);
        let weight = 1.0 / kernel.len() as f32;
        kernel.weights.fill(weight);
        kernel
    }

    /// Gaussian: `exp(-(x² + y²) / sigma²)`, normalized to sum to one.
    ///
    /// A non-positive `sigma` yields the identity kernel.
    pub fn gaussian(radius: usize, sigma: f32) -> Self {
        let mut kernel = Self::new(radius);
        if sigma <= 0.0 {
            let center = kernel.offset_index(0, 0);
            kernel.weights[center] = 1.0;
            return kernel;
        }

        let r = kernel.radius as isize;
        let s2 = sigma * sigma;
        for i in -r..=r {
            for j in -r..=r {
                let idx = kernel.offset_index(i, j);
                kernel.weights[idx] = (-((i * i + j * j) as f32) / s2).exp();
            }
        }

        // Normalize
        let sum = kernel.sum();
        for w in kernel.weights.iter_mut() {
            *w /= sum;
        }
        kernel
    }

    /// 3×3 sharpen: `[[0,-1,0],[-1,5,-1],[0,-1,0]]`.
    pub fn sharpen() -> Self {
        Kernel {
            radius: 1,
            weights: vec![0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0],
        }
    }

    /// Horizontal-gradient Sobel kernel `[[-1,0,1],[-2,0,2],[-1,0,1]]`.
    pub fn sobel_x() -> Self {
        Kernel {
            radius: 1,
            weights: vec![-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0],
        }
    }

    /// Vertical-gradient Sobel kernel, the transpose of [`Kernel::sobel_x`].
    pub fn sobel_y() -> Self {
        Kernel {
            radius: 1,
            weights: vec![-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0],
        }
    }

    /// Diagonal motion blur: `1 / size` along the main diagonal.
    pub fn motion_blur(radius: usize) -> Self {
        let mut kernel = Self::new(radius);
        let size = kernel.size();
        for d in 0..size {
            kernel.weights[d * size + d] = 1.0 / size as f32;
        }
        kernel
    }

    /// Flat (binary) structuring element for morphology.
    pub fn structuring_element(radius: usize) -> Self {
        Self::filled(radius, 1.0)
    }

    /// Same shape with weights scaled to sum to one. Zero-sum kernels are returned unchanged.
    pub fn normalized(&self) -> Self {
        let sum = self.sum();
        if sum == 0.0 {
            return self.clone();
        }
        Kernel {
            radius: self.radius,
            weights: self.weights.iter().map(|w| w / sum).collect(),
        }
    }

    #[inline]
    pub fn radius(&self) -> usize {
        self.radius
    }

    #[inline]
    pub fn size(&self) -> usize {
        2 * self.radius + 1
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    pub fn sum(&self) -> f32 {
        self.weights.iter().sum()
    }

    /// Flat index of offset `(i, j)` from the center.
    #[inline]
    pub fn offset_index(&self, i: isize, j: isize) -> usize {
        let r = self.radius as isize;
        ((i + r) as usize) * self.size() + (j + r) as usize
    }

    /// Weight at offset `(i, j)` from the center.
    #[inline]
    pub fn at(&self, i: isize, j: isize) -> f32 {
        self.weights[self.offset_index(i, j)]
    }

    /// Iterate `(i, j, weight)` over every offset, row by row.
    pub fn offsets(&self) -> impl Iterator<Item = (isize, isize, f32)> + '_ {
        let r = self.radius as isize;
        (-r..=r).flat_map(move |i| (-r..=r).map(move |j| (i, j, self.at(i, j))))
    }
}

impl Index<usize> for Kernel {
    type Output = f32;

    fn index(&self, idx: usize) -> &f32 {
        &self.weights[idx]
    }
}

// ============================================================================
// Traversal
// ============================================================================

/// Allocate an output of the same size and fill it with `f(x, y)` for every pixel.
///
/// Rows are computed in parallel; `f` only ever sees the caller's source, never
/// the output, so the traversal order is unobservable.
pub fn map_pixels<F>(image: &RgbImage, f: F) -> RgbImage
where
    F: Fn(usize, usize) -> Rgb + Sync,
{
    let (width, height) = image.dimensions();
    let mut output = RgbImage::new(width, height);
    if image.is_empty() {
        return output;
    }

    output
        .array_mut()
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, mut row)| {
            for x in 0..width {
                let color = f(x, y);
                for c in 0..3 {
                    row[[x, c]] = color.0[c];
                }
            }
        });

    output
}

/// Like [`map_pixels`], with a per-worker scratch value created by `init`.
///
/// Used by rank filters to reuse a neighborhood buffer instead of allocating
/// one per pixel.
pub fn map_pixels_with<S, I, F>(image: &RgbImage, init: I, f: F) -> RgbImage
where
    I: Fn() -> S + Sync + Send,
    F: Fn(&mut S, usize, usize) -> Rgb + Sync + Send,
{
    let (width, height) = image.dimensions();
    let mut output = RgbImage::new(width, height);
    if image.is_empty() {
        return output;
    }

    output
        .array_mut()
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each_init(init, |scratch, (y, mut row)| {
            for x in 0..width {
                let color = f(scratch, x, y);
                for c in 0..3 {
                    row[[x, c]] = color.0[c];
                }
            }
        });

    output
}

// ============================================================================
// Channel statistics
// ============================================================================

/// Per-channel sums and extrema from one scan over an image.
///
/// Always computed fresh for each call, so one filter instance can process
/// any number of images without carrying statistics between them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChannelStats {
    pub count: usize,
    pub sum: [u64; 3],
    pub min: [u8; 3],
    pub max: [u8; 3],
}

impl ChannelStats {
    pub fn scan(image: &RgbImage) -> Self {
        let mut stats = ChannelStats {
            count: 0,
            sum: [0; 3],
            min: [u8::MAX; 3],
            max: [u8::MIN; 3],
        };
        for (_, _, color) in image.pixels() {
            stats.count += 1;
            for c in 0..3 {
                let v = color.0[c];
                stats.sum[c] += v as u64;
                stats.min[c] = stats.min[c].min(v);
                stats.max[c] = stats.max[c].max(v);
            }
        }
        stats
    }

    /// Mean value per channel; all zero for an empty image.
    pub fn mean(&self) -> [f64; 3] {
        if self.count == 0 {
            return [0.0; 3];
        }
        self.sum.map(|s| s as f64 / self.count as f64)
    }
}
