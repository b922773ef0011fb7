//! Error types for kernel construction, kernel files and image buffers.
//!
//! Per-pixel numeric problems (saturation, zero-range channels, out of range
//! coordinates) are never errors: filters resolve them locally. Only
//! construction and I/O failures surface here.

use std::path::PathBuf;
use thiserror::Error;

/// Error when a kernel cannot be built from the given weights.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KernelError {
    /// Kernel side length must be odd (`2 * radius + 1`).
    #[error("kernel side length must be odd, got {0}")]
    EvenSize(usize),

    /// Weight count does not match `size * size`.
    #[error("kernel of side {size} needs {expected} weights, got {got}")]
    WeightCount {
        /// Side length.
        size: usize,
        /// Expected number of weights.
        expected: usize,
        /// Number of weights provided.
        got: usize,
    },
}

/// Errors raised while reading a kernel description file.
#[derive(Debug, Error)]
pub enum KernelFileError {
    /// The file could not be read.
    #[error("failed to read kernel file {path}: {source}")]
    Io {
        /// Path that was opened.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file has no side-length header.
    #[error("kernel file is empty")]
    Empty,

    /// The header is not a positive integer.
    #[error("line {line}: invalid kernel size {token:?}")]
    InvalidSize {
        /// 1-based line number.
        line: usize,
        /// Offending text.
        token: String,
    },

    /// A weight is not an integer.
    #[error("line {line}: invalid kernel weight {token:?}")]
    InvalidWeight {
        /// 1-based line number.
        line: usize,
        /// Offending text.
        token: String,
    },

    /// The declared size is rejected by [`Kernel`](crate::filters::core::Kernel).
    #[error(transparent)]
    Kernel(#[from] KernelError),
}

/// Errors for image buffers and image files.
#[derive(Debug, Error)]
pub enum ImageError {
    /// Raw data length does not match `width * height * 3`.
    #[error("expected {expected} bytes for {width}x{height} RGB, got {got}")]
    BufferSize {
        /// Image width.
        width: usize,
        /// Image height.
        height: usize,
        /// Expected byte count.
        expected: usize,
        /// Actual byte count.
        got: usize,
    },

    /// Array does not have three color channels.
    #[error("expected 3 channels, got {0}")]
    Channels(usize),

    /// Filesystem access around an image file failed.
    #[error("i/o error for {path}: {source}")]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Decoding or encoding failed.
    #[cfg(feature = "io")]
    #[error("image codec error for {path}: {source}")]
    Codec {
        /// File being read or written.
        path: PathBuf,
        /// Underlying codec error.
        #[source]
        source: image::ImageError,
    },
}
