//! Image file I/O.
//!
//! - `load`: decode a PNG/JPEG/BMP into an [`RgbImage`], dropping any alpha.
//! - `save`: encode an [`RgbImage`]; the format follows the file extension.

use std::fs;
use std::path::Path;

use crate::error::ImageError;
use crate::raster::{PixelBuffer, RgbImage};

/// Load an image from disk and convert to 8-bit RGB.
pub fn load(path: &Path) -> Result<RgbImage, ImageError> {
    let img = image::open(path)
        .map_err(|source| ImageError::Codec {
            path: path.to_path_buf(),
            source,
        })?
        .into_rgb8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    log::debug!("loaded {}x{} image from {}", width, height, path.display());
    RgbImage::from_raw(width, height, img.into_raw())
}

/// Save an image, creating the parent directory if needed.
pub fn save(image: &RgbImage, path: &Path) -> Result<(), ImageError> {
    ensure_parent_dir(path)?;
    let (width, height) = image.dimensions();
    let raw = image.clone().into_raw();
    let expected = raw.len();
    let buffer = image::RgbImage::from_raw(width as u32, height as u32, raw).ok_or(
        ImageError::BufferSize {
            width,
            height,
            expected: width * height * 3,
            got: expected,
        },
    )?;
    buffer.save(path).map_err(|source| ImageError::Codec {
        path: path.to_path_buf(),
        source,
    })
}

fn ensure_parent_dir(path: &Path) -> Result<(), ImageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| ImageError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Rgb;

    #[test]
    fn test_png_round_trip() {
        let dir = std::env::temp_dir().join(format!("kernel_filters_io_{}", std::process::id()));
        let path = dir.join("nested").join("img.png");
        let img = RgbImage::from_fn(3, 2, |x, y| Rgb::new(x as u8 * 80, y as u8 * 100, 7));

        save(&img, &path).unwrap();
        let loaded = load(&path).unwrap();
        assert_eq!(loaded, img);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_save_reports_unusable_directory() {
        let dir = std::env::temp_dir().join(format!("kernel_filters_io_blocked_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let blocker = dir.join("file");
        fs::write(&blocker, b"not a directory").unwrap();

        let err = save(&RgbImage::new(2, 2), &blocker.join("out.png")).unwrap_err();
        match err {
            ImageError::Io { path, .. } => assert_eq!(path, blocker),
            other => panic!("unexpected error: {other}"),
        }

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_missing() {
        let err = load(Path::new("/nonexistent/missing.png")).unwrap_err();
        assert!(matches!(err, ImageError::Codec { .. }));
    }
}
