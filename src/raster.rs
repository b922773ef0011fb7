//! RGB raster storage and the pixel-buffer contract filters read through.
//!
//! ## Layout
//! Pixels are stored in an `ndarray::Array3<u8>` of shape `(height, width, 3)`,
//! the same `(H, W, C)` convention the NumPy and WASM bindings use. Channels
//! are always red, green, blue; alpha is not modeled.

use ndarray::{Array3, ArrayView3};

use crate::error::ImageError;

/// An 8-bit RGB color. Float results enter only through [`Rgb::from_f32`],
/// which clamps and rounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const BLACK: Rgb = Rgb([0, 0, 0]);
    pub const WHITE: Rgb = Rgb([255, 255, 255]);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb([r, g, b])
    }

    /// Gray color with all three channels set to `v`.
    pub const fn gray(v: u8) -> Self {
        Rgb([v, v, v])
    }

    #[inline]
    pub fn r(self) -> u8 {
        self.0[0]
    }

    #[inline]
    pub fn g(self) -> u8 {
        self.0[1]
    }

    #[inline]
    pub fn b(self) -> u8 {
        self.0[2]
    }

    /// Channels as floats for intermediate arithmetic.
    #[inline]
    pub fn to_f32(self) -> [f32; 3] {
        [self.0[0] as f32, self.0[1] as f32, self.0[2] as f32]
    }

    /// Build a color from float channels, clamping to `[0, 255]` and rounding.
    ///
    /// NaN maps to 0, so a degenerate computation can never leak into storage.
    #[inline]
    pub fn from_f32(channels: [f32; 3]) -> Self {
        Rgb(channels.map(crate::filters::core::to_channel))
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(c: [u8; 3]) -> Self {
        Rgb(c)
    }
}

/// Read/write access to a 2D grid of RGB pixels.
///
/// Coordinates are `(x, y)` with `x` in `[0, width)` and `y` in `[0, height)`.
pub trait PixelBuffer {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn get(&self, x: usize, y: usize) -> Rgb;
    fn set(&mut self, x: usize, y: usize, color: Rgb);

    fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Replicate-edge lookup: coordinates outside the grid are clamped to the
    /// nearest valid pixel. Must not be called on an empty buffer.
    #[inline]
    fn get_clamped(&self, x: isize, y: isize) -> Rgb {
        let sx = x.clamp(0, self.width() as isize - 1) as usize;
        let sy = y.clamp(0, self.height() as isize - 1) as usize;
        self.get(sx, sy)
    }

    /// Lookup returning `None` outside the grid.
    #[inline]
    fn get_checked(&self, x: isize, y: isize) -> Option<Rgb> {
        if x < 0 || y < 0 || x >= self.width() as isize || y >= self.height() as isize {
            None
        } else {
            Some(self.get(x as usize, y as usize))
        }
    }
}

/// Owned RGB image with fixed dimensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbImage {
    data: Array3<u8>,
}

impl RgbImage {
    /// Black image of the given size. Zero width or height is allowed.
    pub fn new(width: usize, height: usize) -> Self {
        RgbImage {
            data: Array3::<u8>::zeros((height, width, 3)),
        }
    }

    /// Image with every pixel set to `color`.
    pub fn filled(width: usize, height: usize, color: Rgb) -> Self {
        Self::from_fn(width, height, |_, _| color)
    }

    /// Build an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> Rgb,
    {
        let mut image = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                image.set(x, y, f(x, y));
            }
        }
        image
    }

    /// Wrap an `(height, width, 3)` array.
    pub fn from_array(data: Array3<u8>) -> Result<Self, ImageError> {
        let channels = data.dim().2;
        if channels != 3 {
            return Err(ImageError::Channels(channels));
        }
        Ok(RgbImage { data })
    }

    /// Wrap tightly packed row-major RGB bytes.
    pub fn from_raw(width: usize, height: usize, raw: Vec<u8>) -> Result<Self, ImageError> {
        let expected = width * height * 3;
        if raw.len() != expected {
            return Err(ImageError::BufferSize {
                width,
                height,
                expected,
                got: raw.len(),
            });
        }
        let data = Array3::from_shape_vec((height, width, 3), raw).map_err(|_| {
            ImageError::BufferSize {
                width,
                height,
                expected,
                got: expected,
            }
        })?;
        Ok(RgbImage { data })
    }

    pub fn view(&self) -> ArrayView3<'_, u8> {
        self.data.view()
    }

    pub(crate) fn array_mut(&mut self) -> &mut Array3<u8> {
        &mut self.data
    }

    pub fn into_array(self) -> Array3<u8> {
        self.data
    }

    /// Row-major RGB bytes.
    pub fn into_raw(self) -> Vec<u8> {
        if self.data.is_standard_layout() {
            self.data.into_raw_vec_and_offset().0
        } else {
            self.data.iter().copied().collect()
        }
    }

    /// Pixels in row-major order with their coordinates.
    pub fn pixels(&self) -> impl Iterator<Item = (usize, usize, Rgb)> + '_ {
        let (width, height) = self.dimensions();
        (0..height).flat_map(move |y| (0..width).map(move |x| (x, y, self.get(x, y))))
    }
}

impl PixelBuffer for RgbImage {
    #[inline]
    fn width(&self) -> usize {
        self.data.dim().1
    }

    #[inline]
    fn height(&self) -> usize {
        self.data.dim().0
    }

    #[inline]
    fn get(&self, x: usize, y: usize) -> Rgb {
        Rgb([
            self.data[[y, x, 0]],
            self.data[[y, x, 1]],
            self.data[[y, x, 2]],
        ])
    }

    #[inline]
    fn set(&mut self, x: usize, y: usize, color: Rgb) {
        for c in 0..3 {
            self.data[[y, x, c]] = color.0[c];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_f32_clamps_and_rounds() {
        assert_eq!(Rgb::from_f32([-3.0, 127.5, 300.0]), Rgb::new(0, 128, 255));
        assert_eq!(Rgb::from_f32([f32::NAN, 1.4, 254.6]), Rgb::new(0, 1, 255));
    }

    #[test]
    fn test_get_clamped_replicates_edges() {
        let img = RgbImage::from_fn(2, 2, |x, y| Rgb::gray((x + 2 * y) as u8));
        assert_eq!(img.get_clamped(-5, -5), Rgb::gray(0));
        assert_eq!(img.get_clamped(9, 0), Rgb::gray(1));
        assert_eq!(img.get_clamped(0, 9), Rgb::gray(2));
        assert_eq!(img.get_clamped(7, 7), Rgb::gray(3));
    }

    #[test]
    fn test_get_checked_outside_is_none() {
        let img = RgbImage::new(2, 1);
        assert!(img.get_checked(2, 0).is_none());
        assert!(img.get_checked(0, -1).is_none());
        assert_eq!(img.get_checked(1, 0), Some(Rgb::BLACK));
    }

    #[test]
    fn test_from_raw_rejects_wrong_length() {
        let err = RgbImage::from_raw(2, 2, vec![0; 11]).unwrap_err();
        assert!(matches!(err, ImageError::BufferSize { expected: 12, got: 11, .. }));
    }

    #[test]
    fn test_from_array_rejects_rgba() {
        let err = RgbImage::from_array(Array3::<u8>::zeros((2, 2, 4))).unwrap_err();
        assert!(matches!(err, ImageError::Channels(4)));
    }

    #[test]
    fn test_raw_round_trip_layout() {
        let raw: Vec<u8> = (0..12).collect();
        let img = RgbImage::from_raw(2, 2, raw.clone()).unwrap();
        assert_eq!(img.get(1, 0), Rgb::new(3, 4, 5));
        assert_eq!(img.get(0, 1), Rgb::new(6, 7, 8));
        assert_eq!(img.into_raw(), raw);
    }

    #[test]
    fn test_zero_sized_image() {
        let img = RgbImage::new(0, 4);
        assert!(img.is_empty());
        assert_eq!(img.dimensions(), (0, 4));
        assert_eq!(img.pixels().count(), 0);
    }
}
