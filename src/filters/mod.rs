//! Image filters over 8-bit RGB rasters.
//!
//! ## Architecture
//!
//! Every filter reads only from its source image and writes into a freshly
//! allocated output of the same dimensions. There are two tiers:
//!
//! | Tier | Trait | Implements | Examples |
//! |------|-------|------------|----------|
//! | Per-pixel | [`PixelFilter`] | `compute_pixel(image, x, y)` | invert, blur, dilation, wave |
//! | Whole-image | [`Filter`] | `apply(image)` | gray world, auto levels, opening, median |
//!
//! Every [`PixelFilter`] is a [`Filter`]: the shared traversal evaluates the
//! hook for each pixel, rows in parallel with rayon. Whole-image filters
//! implement [`Filter::apply`] directly when they need a statistics pass,
//! several passes, or sequential state.
//!
//! ## Boundaries
//!
//! Neighborhood lookups replicate the nearest edge pixel. The only exception
//! is [`Translate`](distort::Translate), which maps sources outside the image
//! to black.
//!
//! ## Filter Categories
//!
//! - **Point**: invert, brightness (`color_adjust`), grayscale, sepia (`grayscale`)
//! - **Convolution**: blur, gaussian, motion blur (`blur`), sharpen, sobel (`edge`)
//! - **Rank**: dilation, erosion, opening, closing, gradient (`morphology`), median (`noise`)
//! - **Statistics**: gray world, perfect reflector (`color_balance`), auto levels (`levels`)
//! - **Geometric**: translate, glass, wave (`distort`)

use crate::raster::{Rgb, RgbImage};

pub mod core;
pub mod color_adjust;
pub mod grayscale;
pub mod blur;
pub mod edge;
pub mod morphology;
pub mod noise;
pub mod color_balance;
pub mod levels;
pub mod distort;

pub use self::blur::{Blur, Convolution, Gaussian, MotionBlur};
pub use self::color_adjust::{Brightness, Invert};
pub use self::color_balance::{GrayWorld, PerfectReflector};
pub use self::core::Kernel;
pub use self::distort::{Glass, Translate, Wave};
pub use self::edge::{Sharpen, Sobel, SobelDirection};
pub use self::grayscale::{Grayscale, Sepia};
pub use self::levels::AutoLevels;
pub use self::morphology::{Closing, Dilation, Erosion, Gradient, Opening};
pub use self::noise::Median;

/// An image transform: source image in, new image of the same size out.
pub trait Filter: Send + Sync {
    fn apply(&self, image: &RgbImage) -> RgbImage;

    /// Short display name, e.g. `"GrayWorld"`.
    fn name(&self) -> &'static str {
        short_type_name::<Self>()
    }
}

/// A filter defined entirely by how it computes one output pixel.
///
/// `compute_pixel` may read any source pixel but must not depend on other
/// output pixels. It is never called on an empty image.
pub trait PixelFilter: Send + Sync {
    fn compute_pixel(&self, image: &RgbImage, x: usize, y: usize) -> Rgb;
}

impl<T: PixelFilter> Filter for T {
    fn apply(&self, image: &RgbImage) -> RgbImage {
        self::core::map_pixels(image, |x, y| self.compute_pixel(image, x, y))
    }
}

fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// Filters applied one after another, each reading the previous result.
#[derive(Default)]
pub struct Chain {
    filters: Vec<Box<dyn Filter>>,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then<F: Filter + 'static>(mut self, filter: F) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn push(&mut self, filter: Box<dyn Filter>) {
        self.filters.push(filter);
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl Filter for Chain {
    fn apply(&self, image: &RgbImage) -> RgbImage {
        let mut current = image.clone();
        for filter in &self.filters {
            log::debug!("chain: applying {}", filter.name());
            current = filter.apply(&current);
        }
        current
    }
}
