//! Image download: fetch each extracted URL into an indexed file.
//!
//! Downloads run sequentially over the shared client. A failed image is
//! logged and skipped: no file is written for that index, and the
//! assembled document simply lacks that page. There are no retries.

use crate::error::MangaError;
use crate::pipeline::scrape::ImageLinks;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::fs;
use std::path::Path;
use tracing::{debug, error};

/// Download every linked image into `dir` as `{index}{ext}`.
///
/// Returns the number of files actually written. Non-200 responses and
/// transport failures are reported and leave no file behind.
pub fn download_images(client: &Client, links: &ImageLinks, dir: &Path) -> usize {
    let mut saved = 0;

    for (index, url) in links.urls.iter().enumerate() {
        let file = dir.join(format!("{index}{}", links.ext));
        debug!("downloading {url} to {}", file.display());

        match client.get(url).send() {
            Ok(response) if response.status() == StatusCode::OK => match response.bytes() {
                Ok(bytes) => {
                    if let Err(e) = fs::write(&file, &bytes) {
                        error!("cannot write {}: {e}", file.display());
                    } else {
                        saved += 1;
                    }
                }
                Err(e) => error!("cannot read body of {url}: {e}"),
            },
            Ok(response) => error!("cannot download {url}: HTTP {}", response.status()),
            Err(e) => error!("cannot download {url}: {e}"),
        }
    }

    saved
}

/// Remove every image file in `dir` whose name contains `ext`, then the
/// directory itself.
///
/// The directory removal is not forced: if a foreign file survives the
/// filter, `remove_dir` fails and the error propagates rather than
/// deleting something this tool did not create.
pub fn remove_images(dir: &Path, ext: &str) -> Result<(), MangaError> {
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
        let name = entry.file_name();
        if name.to_string_lossy().contains(ext) {
            fs::remove_file(&path).map_err(|e| MangaError::Io { path, source: e })?;
        }
    }

    fs::remove_dir(dir).map_err(|e| MangaError::Io {
        path: dir.to_path_buf(),
        source: e,
    })
}
