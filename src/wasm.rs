//! WebAssembly exports for the filters.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Every export
//! takes a flat array of RGB bytes (length = width * height * 3, row-major)
//! and returns a new array of the same length. A buffer whose length does not
//! match the dimensions is rejected with a JavaScript error.
//!
//! Callers holding RGBA canvas data strip and restore alpha themselves.

use wasm_bindgen::prelude::*;

use crate::filters::{
    AutoLevels, Blur, Brightness, Closing, Dilation, Erosion, Filter, Gaussian, Glass, Gradient,
    GrayWorld, Grayscale, Invert, Median, MotionBlur, Opening, PerfectReflector, Sepia, Sharpen,
    Sobel, SobelDirection, Translate, Wave,
};
use crate::raster::RgbImage;

fn run<F: Filter>(data: &[u8], width: usize, height: usize, filter: &F) -> Result<Vec<u8>, JsValue> {
    let input = RgbImage::from_raw(width, height, data.to_vec())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(filter.apply(&input).into_raw())
}

// ============================================================================
// Point Filters
// ============================================================================

#[wasm_bindgen]
pub fn invert_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsValue> {
    run(data, width, height, &Invert)
}

#[wasm_bindgen]
pub fn grayscale_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsValue> {
    run(data, width, height, &Grayscale)
}

#[wasm_bindgen]
pub fn sepia_wasm(data: &[u8], width: usize, height: usize, k: f32) -> Result<Vec<u8>, JsValue> {
    run(data, width, height, &Sepia::new(k))
}

#[wasm_bindgen]
pub fn brightness_wasm(data: &[u8], width: usize, height: usize, k: f32) -> Result<Vec<u8>, JsValue> {
    run(data, width, height, &Brightness::new(k))
}

// ============================================================================
// Convolution Filters
// ============================================================================

#[wasm_bindgen]
pub fn blur_wasm(data: &[u8], width: usize, height: usize, radius: usize) -> Result<Vec<u8>, JsValue> {
    run(data, width, height, &Blur::new(radius))
}

/// Gaussian blur over a `(2 * radius + 1)²` window.
#[wasm_bindgen]
pub fn gaussian_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    radius: usize,
    sigma: f32,
) -> Result<Vec<u8>, JsValue> {
    run(data, width, height, &Gaussian::new(radius, sigma))
}

#[wasm_bindgen]
pub fn motion_blur_wasm(data: &[u8], width: usize, height: usize, radius: usize) -> Result<Vec<u8>, JsValue> {
    run(data, width, height, &MotionBlur::new(radius))
}

#[wasm_bindgen]
pub fn sharpen_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsValue> {
    run(data, width, height, &Sharpen::new())
}

/// Sobel gradient magnitude per channel.
#[wasm_bindgen]
pub fn sobel_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsValue> {
    run(data, width, height, &Sobel::new(SobelDirection::Magnitude))
}

// ============================================================================
// Rank / Morphology Filters
// ============================================================================

#[wasm_bindgen]
pub fn dilate_wasm(data: &[u8], width: usize, height: usize, radius: usize) -> Result<Vec<u8>, JsValue> {
    run(data, width, height, &Dilation::new(radius))
}

#[wasm_bindgen]
pub fn erode_wasm(data: &[u8], width: usize, height: usize, radius: usize) -> Result<Vec<u8>, JsValue> {
    run(data, width, height, &Erosion::new(radius))
}

#[wasm_bindgen]
pub fn opening_wasm(data: &[u8], width: usize, height: usize, radius: usize) -> Result<Vec<u8>, JsValue> {
    run(data, width, height, &Opening::new(radius))
}

#[wasm_bindgen]
pub fn closing_wasm(data: &[u8], width: usize, height: usize, radius: usize) -> Result<Vec<u8>, JsValue> {
    run(data, width, height, &Closing::new(radius))
}

#[wasm_bindgen]
pub fn morph_gradient_wasm(data: &[u8], width: usize, height: usize, radius: usize) -> Result<Vec<u8>, JsValue> {
    run(data, width, height, &Gradient::new(radius))
}

#[wasm_bindgen]
pub fn median_wasm(data: &[u8], width: usize, height: usize, radius: usize) -> Result<Vec<u8>, JsValue> {
    run(data, width, height, &Median::new(radius))
}

// ============================================================================
// Statistics Filters
// ============================================================================

#[wasm_bindgen]
pub fn gray_world_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsValue> {
    run(data, width, height, &GrayWorld)
}

#[wasm_bindgen]
pub fn perfect_reflector_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsValue> {
    run(data, width, height, &PerfectReflector)
}

#[wasm_bindgen]
pub fn auto_levels_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsValue> {
    run(data, width, height, &AutoLevels)
}

// ============================================================================
// Geometric Filters
// ============================================================================

#[wasm_bindgen]
pub fn translate_wasm(data: &[u8], width: usize, height: usize, dx: isize, dy: isize) -> Result<Vec<u8>, JsValue> {
    run(data, width, height, &Translate::new(dx, dy))
}

/// Frosted glass. The same `seed` always gives the same result.
#[wasm_bindgen]
pub fn glass_wasm(data: &[u8], width: usize, height: usize, radius: usize, seed: u64) -> Result<Vec<u8>, JsValue> {
    run(data, width, height, &Glass::seeded(radius, seed))
}

#[wasm_bindgen]
pub fn wave_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    amplitude: f32,
    period: f32,
) -> Result<Vec<u8>, JsValue> {
    run(data, width, height, &Wave::new(amplitude, period))
}
