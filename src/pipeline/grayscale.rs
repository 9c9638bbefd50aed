//! Grayscale normalization: rewrite each image as 8-bit luminance.
//!
//! ## Why sniff the format from content?
//!
//! Every download is saved under a `.jpg` name, but the fallback link set
//! can put PNG bytes behind that name. Guessing the container from the
//! file content (not the extension) means each file is re-encoded in the
//! format it actually arrived in, and a second pass over an
//! already-grayscale file is a pixel-level no-op.

use crate::error::MangaError;
use image::io::Reader;
use image::DynamicImage;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Convert every file in `dir` to single-channel luminance, in place.
///
/// Operates on the directory contents rather than a download list, so a
/// re-run (or a run over a partially downloaded directory) normalizes
/// whatever is present.
pub fn normalize_directory(dir: &Path) -> Result<(), MangaError> {
    let entries = fs::read_dir(dir).map_err(|e| MangaError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| MangaError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if path.is_file() {
            convert_grayscale(&path)?;
        }
    }

    Ok(())
}

/// Decode one image, convert it to 8-bit luminance, and overwrite it in
/// its original container format.
pub fn convert_grayscale(path: &Path) -> Result<(), MangaError> {
    let reader = Reader::open(path)
        .map_err(|e| MangaError::Io {
            path: path.to_path_buf(),
            source: e,
        })?
        .with_guessed_format()
        .map_err(|e| MangaError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

    let format = reader.format().ok_or_else(|| MangaError::UnrecognisedImage {
        path: path.to_path_buf(),
    })?;

    let decoded = reader.decode().map_err(|e| MangaError::ImageProcessing {
        path: path.to_path_buf(),
        source: e,
    })?;

    debug!("converting {} to grayscale ({format:?})", path.display());
    let gray = DynamicImage::ImageLuma8(decoded.to_luma8());
    gray.save_with_format(path, format)
        .map_err(|e| MangaError::ImageProcessing {
            path: path.to_path_buf(),
            source: e,
        })
}
