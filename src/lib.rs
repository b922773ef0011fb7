//! Kernel Filters
//!
//! Pixel, convolution, rank and statistics filters for 8-bit RGB images,
//! with optional Python bindings via PyO3 and WASM bindings for JavaScript.
//!
//! ## Image Format
//! Images are `(height, width, 3)` arrays of `u8` (see [`raster::RgbImage`]).
//! Alpha is not modeled; loaders drop it.
//!
//! ## Filter Architecture
//! A filter never modifies its input: [`filters::Filter::apply`] reads the
//! source and returns a new image of the same dimensions. Simple filters only
//! describe one output pixel ([`filters::PixelFilter`]); multi-pass filters
//! implement the whole-image entry point. See [`filters`] for the catalogue.
//!
//! ```
//! use kernel_filters::filters::{Filter, Gaussian, Opening};
//! use kernel_filters::raster::{Rgb, RgbImage};
//!
//! let img = RgbImage::filled(8, 8, Rgb::new(10, 20, 30));
//! let blurred = Gaussian::new(2, 3.0).apply(&img);
//! let cleaned = Opening::new(1).apply(&blurred);
//! assert_eq!(cleaned, img);
//! ```

pub mod error;
pub mod filters;
pub mod kernel_file;
pub mod raster;

#[cfg(feature = "io")]
pub mod io;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{ImageError, KernelError, KernelFileError};
pub use filters::{Filter, Kernel, PixelFilter};
pub use raster::{PixelBuffer, Rgb, RgbImage};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::filters::{
        AutoLevels, Blur, Brightness, Closing, Dilation, Erosion, Filter, Gaussian, Glass,
        Gradient, GrayWorld, Grayscale, Invert, Median, MotionBlur, Opening, PerfectReflector,
        Sepia, Sharpen, Sobel, SobelDirection, Translate, Wave,
    };
    use crate::raster::RgbImage;

    /// Run `filter` on a `(H, W, 3)` uint8 array.
    fn run<'py, F: Filter + ?Sized>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        filter: &F,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = RgbImage::from_array(image.as_array().to_owned())
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        let result = py.allow_threads(|| filter.apply(&input));
        Ok(result.into_array().into_pyarray(py))
    }

    // ========================================================================
    // Point Filters
    // ========================================================================

    #[pyfunction]
    pub fn invert<'py>(py: Python<'py>, image: PyReadonlyArray3<'py, u8>) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, &Invert)
    }

    /// Weighted grayscale, `0.299 R + 0.587 G + 0.144 B` on all channels.
    #[pyfunction]
    pub fn grayscale<'py>(py: Python<'py>, image: PyReadonlyArray3<'py, u8>) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, &Grayscale)
    }

    #[pyfunction]
    #[pyo3(signature = (image, k=10.0))]
    pub fn sepia<'py>(py: Python<'py>, image: PyReadonlyArray3<'py, u8>, k: f32) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, &Sepia::new(k))
    }

    #[pyfunction]
    #[pyo3(signature = (image, k=50.0))]
    pub fn brightness<'py>(py: Python<'py>, image: PyReadonlyArray3<'py, u8>, k: f32) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, &Brightness::new(k))
    }

    // ========================================================================
    // Convolution Filters
    // ========================================================================

    #[pyfunction]
    #[pyo3(signature = (image, radius=1))]
    pub fn blur<'py>(py: Python<'py>, image: PyReadonlyArray3<'py, u8>, radius: usize) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, &Blur::new(radius))
    }

    #[pyfunction]
    #[pyo3(signature = (image, radius=2, sigma=3.0))]
    pub fn gaussian<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        radius: usize,
        sigma: f32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, &Gaussian::new(radius, sigma))
    }

    #[pyfunction]
    #[pyo3(signature = (image, radius=4))]
    pub fn motion_blur<'py>(py: Python<'py>, image: PyReadonlyArray3<'py, u8>, radius: usize) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, &MotionBlur::new(radius))
    }

    #[pyfunction]
    pub fn sharpen<'py>(py: Python<'py>, image: PyReadonlyArray3<'py, u8>) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, &Sharpen::new())
    }

    /// Sobel edges; `direction` is "h", "v" or "both" (magnitude).
    #[pyfunction]
    #[pyo3(signature = (image, direction="both"))]
    pub fn sobel<'py>(py: Python<'py>, image: PyReadonlyArray3<'py, u8>, direction: &str) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let direction = match direction {
            "h" => SobelDirection::Horizontal,
            "v" => SobelDirection::Vertical,
            "both" => SobelDirection::Magnitude,
            other => return Err(PyValueError::new_err(format!("unknown sobel direction {other:?}"))),
        };
        run(py, image, &Sobel::new(direction))
    }

    // ========================================================================
    // Rank / Morphology Filters
    // ========================================================================

    #[pyfunction]
    #[pyo3(signature = (image, radius=1))]
    pub fn dilate<'py>(py: Python<'py>, image: PyReadonlyArray3<'py, u8>, radius: usize) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, &Dilation::new(radius))
    }

    #[pyfunction]
    #[pyo3(signature = (image, radius=1))]
    pub fn erode<'py>(py: Python<'py>, image: PyReadonlyArray3<'py, u8>, radius: usize) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, &Erosion::new(radius))
    }

    #[pyfunction]
    #[pyo3(signature = (image, radius=1))]
    pub fn opening<'py>(py: Python<'py>, image: PyReadonlyArray3<'py, u8>, radius: usize) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, &Opening::new(radius))
    }

    #[pyfunction]
    #[pyo3(signature = (image, radius=1))]
    pub fn closing<'py>(py: Python<'py>, image: PyReadonlyArray3<'py, u8>, radius: usize) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, &Closing::new(radius))
    }

    #[pyfunction]
    #[pyo3(signature = (image, radius=1))]
    pub fn morph_gradient<'py>(py: Python<'py>, image: PyReadonlyArray3<'py, u8>, radius: usize) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, &Gradient::new(radius))
    }

    #[pyfunction]
    #[pyo3(signature = (image, radius=1))]
    pub fn median<'py>(py: Python<'py>, image: PyReadonlyArray3<'py, u8>, radius: usize) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, &Median::new(radius))
    }

    // ========================================================================
    // Statistics Filters
    // ========================================================================

    #[pyfunction]
    pub fn gray_world<'py>(py: Python<'py>, image: PyReadonlyArray3<'py, u8>) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, &GrayWorld)
    }

    #[pyfunction]
    pub fn perfect_reflector<'py>(py: Python<'py>, image: PyReadonlyArray3<'py, u8>) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, &PerfectReflector)
    }

    #[pyfunction]
    pub fn auto_levels<'py>(py: Python<'py>, image: PyReadonlyArray3<'py, u8>) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, &AutoLevels)
    }

    // ========================================================================
    // Geometric Filters
    // ========================================================================

    #[pyfunction]
    #[pyo3(signature = (image, dx=50, dy=0))]
    pub fn translate<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        dx: isize,
        dy: isize,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, &Translate::new(dx, dy))
    }

    /// Frosted glass; pass `seed` for reproducible output.
    #[pyfunction]
    #[pyo3(signature = (image, radius=5, seed=None))]
    pub fn glass<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        radius: usize,
        seed: Option<u64>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let filter = match seed {
            Some(seed) => Glass::seeded(radius, seed),
            None => Glass::new(radius),
        };
        run(py, image, &filter)
    }

    #[pyfunction]
    #[pyo3(signature = (image, amplitude=20.0, period=30.0))]
    pub fn wave<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        amplitude: f32,
        period: f32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        run(py, image, &Wave::new(amplitude, period))
    }

    /// Kernel Filters extension module
    #[pymodule]
    pub fn kernel_filters(m: &Bound<'_, PyModule>) -> PyResult<()> {
        // Point filters
        m.add_function(wrap_pyfunction!(invert, m)?)?;
        m.add_function(wrap_pyfunction!(grayscale, m)?)?;
        m.add_function(wrap_pyfunction!(sepia, m)?)?;
        m.add_function(wrap_pyfunction!(brightness, m)?)?;

        // Convolution filters
        m.add_function(wrap_pyfunction!(blur, m)?)?;
        m.add_function(wrap_pyfunction!(gaussian, m)?)?;
        m.add_function(wrap_pyfunction!(motion_blur, m)?)?;
        m.add_function(wrap_pyfunction!(sharpen, m)?)?;
        m.add_function(wrap_pyfunction!(sobel, m)?)?;

        // Rank / morphology filters
        m.add_function(wrap_pyfunction!(dilate, m)?)?;
        m.add_function(wrap_pyfunction!(erode, m)?)?;
        m.add_function(wrap_pyfunction!(opening, m)?)?;
        m.add_function(wrap_pyfunction!(closing, m)?)?;
        m.add_function(wrap_pyfunction!(morph_gradient, m)?)?;
        m.add_function(wrap_pyfunction!(median, m)?)?;

        // Statistics filters
        m.add_function(wrap_pyfunction!(gray_world, m)?)?;
        m.add_function(wrap_pyfunction!(perfect_reflector, m)?)?;
        m.add_function(wrap_pyfunction!(auto_levels, m)?)?;

        // Geometric filters
        m.add_function(wrap_pyfunction!(translate, m)?)?;
        m.add_function(wrap_pyfunction!(glass, m)?)?;
        m.add_function(wrap_pyfunction!(wave, m)?)?;

        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::kernel_filters;
