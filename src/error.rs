//! Error types for the manga2pdf library.
//!
//! One enum covers every chapter-fatal failure. Per-image download failures
//! are deliberately *not* represented here: a missing page is tolerated by
//! design (the document simply skips that index), so those failures are
//! logged by [`crate::pipeline::download`] and the pipeline carries on.
//! Everything in [`MangaError`] abandons the current chapter; the run driver
//! logs it and moves on to the next chapter.

use std::path::PathBuf;
use thiserror::Error;

/// All chapter-fatal errors returned by the manga2pdf library.
#[derive(Debug, Error)]
pub enum MangaError {
    // ── Scraping errors ───────────────────────────────────────────────────
    /// The chapter page could not be fetched at the transport level.
    #[error("Failed to fetch page '{url}': {reason}\nCheck the URL and your internet connection.")]
    PageFetchFailed { url: String, reason: String },

    /// The page was fetched but no `<img>` source matched the expected
    /// numeric filename patterns.
    #[error("No image links found at '{url}'\nThe page layout may not match the expected /<digits>.jpg naming.")]
    NoImageLinks { url: String },

    // ── Filesystem errors ─────────────────────────────────────────────────
    /// The requested working directory path exists and is not a directory.
    #[error("Output path '{path}' exists and is not a directory")]
    DirectoryConflict { path: PathBuf },

    /// An I/O operation on a specific path failed.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Image errors ──────────────────────────────────────────────────────
    /// A file in the working directory does not follow the `{index}{ext}`
    /// naming scheme, so its page position cannot be determined.
    #[error("Image file '{path}' does not follow the {{index}}{{ext}} naming scheme")]
    MalformedImageName { path: PathBuf },

    /// A downloaded file could not be recognised as any supported image
    /// container.
    #[error("Could not detect the image format of '{path}'\nThe download may be truncated or not an image at all.")]
    UnrecognisedImage { path: PathBuf },

    /// Decoding or re-encoding an image failed.
    #[error("Failed to process image '{path}': {source}")]
    ImageProcessing {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    // ── Output errors ─────────────────────────────────────────────────────
    /// The assembled PDF could not be written.
    #[error("Failed to write PDF '{path}': {detail}")]
    PdfWriteFailed { path: PathBuf, detail: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// A `lo-hi` chapter range contained non-integer tokens or the wrong
    /// number of tokens.
    #[error("Invalid chapter specifier '{spec}': {detail}\nExpected formats: 9-23 or 1,2,3.")]
    InvalidChapterSpec { spec: String, detail: String },

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
