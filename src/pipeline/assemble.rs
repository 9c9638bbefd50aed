//! Page assembly: turn the working directory's images into one PDF.
//!
//! ## Page geometry
//!
//! Every page in the document shares one size: the pixel dimensions of the
//! largest portrait image (height strictly greater than width, largest
//! width+height sum). Pages are specified in points with images placed at
//! 72 dpi, so one image pixel is exactly one PDF point and images are
//! never scaled. A landscape-only chapter degenerates to (0, 0) pages,
//! which is accepted rather than treated as an error.
//!
//! ## Ordering
//!
//! Page order is the numeric file index, parsed explicitly from the file
//! stem. A name that does not parse is a hard error rather than a silent
//! misordering.

use crate::error::MangaError;
use image::io::Reader;
use printpdf::{Image, ImageTransform, Mm, PdfDocument, Pt};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// List the images in `dir` in ascending numeric filename order.
///
/// Index gaps (failed downloads) are fine; a file whose stem is not an
/// integer is not.
pub fn collect_ordered_images(dir: &Path) -> Result<Vec<PathBuf>, MangaError> {
    let entries = fs::read_dir(dir).map_err(|e| MangaError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut indexed: Vec<(u32, PathBuf)> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| MangaError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        let index = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .and_then(|stem| stem.parse::<u32>().ok())
            .ok_or_else(|| MangaError::MalformedImageName { path: path.clone() })?;
        indexed.push((index, path));
    }

    indexed.sort_by_key(|(index, _)| *index);
    Ok(indexed.into_iter().map(|(_, path)| path).collect())
}

/// Pick the document page size: dimensions of the portrait image with the
/// largest width+height sum, or (0, 0) when no image is portrait.
///
/// Dimensions are read via content sniffing, never the file extension:
/// the fallback link set leaves PNG bytes under `.jpg` names.
pub fn page_size(images: &[PathBuf]) -> Result<(u32, u32), MangaError> {
    let mut size = (0u32, 0u32);
    for path in images {
        let (w, h) = Reader::open(path)
            .map_err(|e| MangaError::Io {
                path: path.clone(),
                source: e,
            })?
            .with_guessed_format()
            .map_err(|e| MangaError::Io {
                path: path.clone(),
                source: e,
            })?
            .into_dimensions()
            .map_err(|e| MangaError::ImageProcessing {
                path: path.clone(),
                source: e,
            })?;
        if h > w && w + h > size.0 + size.1 {
            size = (w, h);
        }
    }
    Ok(size)
}

/// Assemble `images` into a PDF at `output`, one page per image.
///
/// Each image is drawn at its native pixel size with its top-left corner
/// at the page's top-left corner. An existing file at `output` is
/// overwritten.
pub fn assemble_pdf(images: &[PathBuf], output: &Path, title: &str) -> Result<(), MangaError> {
    let (page_w, page_h) = page_size(images)?;
    info!(
        "creating pdf {} ({} pages, page size {page_w}x{page_h} pt)",
        output.display(),
        images.len()
    );

    let width = Mm::from(Pt(page_w as f32));
    let height = Mm::from(Pt(page_h as f32));
    let (doc, first_page, first_layer) = PdfDocument::new(title, width, height, "page");

    let mut current = (first_page, first_layer);
    for (i, path) in images.iter().enumerate() {
        if i > 0 {
            current = doc.add_page(width, height, "page");
        }

        let decoded = Reader::open(path)
            .map_err(|e| MangaError::Io {
                path: path.clone(),
                source: e,
            })?
            .with_guessed_format()
            .map_err(|e| MangaError::Io {
                path: path.clone(),
                source: e,
            })?
            .decode()
            .map_err(|e| MangaError::ImageProcessing {
                path: path.clone(),
                source: e,
            })?;
        let image_h = decoded.height();
        debug!(
            "page {i}: {} ({}x{image_h} px)",
            path.display(),
            decoded.width()
        );

        // PDF pages are anchored at the bottom-left; shift the image up so
        // its top-left corner lands on the page's top-left corner.
        let translate_y = Mm::from(Pt(page_h as f32 - image_h as f32));
        let layer = doc.get_page(current.0).get_layer(current.1);
        Image::from_dynamic_image(&decoded).add_to_layer(
            layer,
            ImageTransform {
                translate_x: Some(Mm(0.0)),
                translate_y: Some(translate_y),
                dpi: Some(72.0),
                ..Default::default()
            },
        );
    }

    let file = File::create(output).map_err(|e| MangaError::Io {
        path: output.to_path_buf(),
        source: e,
    })?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| MangaError::PdfWriteFailed {
            path: output.to_path_buf(),
            detail: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgb, RgbImage};

    fn write_png(path: &Path, w: u32, h: u32) {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, Rgb([90, 90, 90])));
        img.save_with_format(path, image::ImageFormat::Png).unwrap();
    }

    #[test]
    fn ordering_is_numeric_not_lexical() {
        let tmp = tempfile::tempdir().unwrap();
        for i in [0u32, 2, 10, 1] {
            write_png(&tmp.path().join(format!("{i}.jpg")), 4, 4);
        }

        let images = collect_ordered_images(tmp.path()).unwrap();
        let stems: Vec<String> = images
            .iter()
            .map(|p| p.file_stem().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(stems, vec!["0", "1", "2", "10"]);
    }

    #[test]
    fn index_gaps_are_tolerated() {
        let tmp = tempfile::tempdir().unwrap();
        write_png(&tmp.path().join("0.jpg"), 4, 4);
        write_png(&tmp.path().join("2.jpg"), 4, 4);

        let images = collect_ordered_images(tmp.path()).unwrap();
        assert_eq!(images.len(), 2);
    }

    #[test]
    fn non_numeric_name_fails_loudly() {
        let tmp = tempfile::tempdir().unwrap();
        write_png(&tmp.path().join("0.jpg"), 4, 4);
        fs::write(tmp.path().join("cover.jpg"), b"x").unwrap();

        let err = collect_ordered_images(tmp.path()).unwrap_err();
        assert!(matches!(err, MangaError::MalformedImageName { .. }));
    }

    #[test]
    fn page_size_picks_the_largest_portrait_image() {
        let tmp = tempfile::tempdir().unwrap();
        write_png(&tmp.path().join("0.jpg"), 100, 150);
        write_png(&tmp.path().join("1.jpg"), 150, 100);

        let images = collect_ordered_images(tmp.path()).unwrap();
        assert_eq!(page_size(&images).unwrap(), (100, 150));
    }

    #[test]
    fn page_size_sniffs_the_container_not_the_extension() {
        let tmp = tempfile::tempdir().unwrap();
        // PNG bytes under a .jpg name, like the fallback link set leaves
        // behind, next to a real JPEG.
        write_png(&tmp.path().join("0.jpg"), 100, 150);
        let jpeg = DynamicImage::ImageRgb8(RgbImage::from_pixel(80, 120, Rgb([90, 90, 90])));
        jpeg.save_with_format(tmp.path().join("1.jpg"), image::ImageFormat::Jpeg)
            .unwrap();

        let images = collect_ordered_images(tmp.path()).unwrap();
        assert_eq!(page_size(&images).unwrap(), (100, 150));
    }

    #[test]
    fn page_size_degenerates_when_nothing_is_portrait() {
        let tmp = tempfile::tempdir().unwrap();
        write_png(&tmp.path().join("0.jpg"), 150, 100);
        // A square image is not strictly taller than wide.
        write_png(&tmp.path().join("1.jpg"), 120, 120);

        let images = collect_ordered_images(tmp.path()).unwrap();
        assert_eq!(page_size(&images).unwrap(), (0, 0));
    }

    #[test]
    fn assemble_writes_a_pdf_with_overwrite() {
        let tmp = tempfile::tempdir().unwrap();
        let work = tmp.path().join("work");
        fs::create_dir(&work).unwrap();
        write_png(&work.join("0.jpg"), 100, 150);
        write_png(&work.join("1.jpg"), 150, 100);

        // The output is a sibling of the working directory, and may exist.
        let output = tmp.path().join("out.pdf");
        fs::write(&output, b"stale").unwrap();

        let images = collect_ordered_images(&work).unwrap();
        assemble_pdf(&images, &output, "out").unwrap();

        let bytes = fs::read(&output).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 5, "stale content must be replaced");
    }
}
