//! # manga2pdf
//!
//! Download manga chapters and assemble them into grayscale PDF files.
//!
//! A chapter page lists its scans as `<img>` elements whose sources end in
//! a purely numeric filename. This crate scrapes those links, downloads
//! each image into an indexed file, normalizes everything to grayscale,
//! and emits one PDF page per image, unscaled, at the image's native
//! pixel size.
//!
//! ## Pipeline Overview
//!
//! ```text
//! chapter URL
//!  │
//!  ├─ 1. Scrape    fetch the page, extract numeric .jpg/.png image links
//!  ├─ 2. Download  GET each link into {index}.jpg in the working directory
//!  ├─ 3. Grayscale decode, convert to luminance, rewrite in place
//!  ├─ 4. Assemble  one PDF page per image, sized by the largest portrait scan
//!  └─ 5. Cleanup   optionally remove the images and working directory
//! ```
//!
//! Everything runs single-threaded with blocking I/O; one HTTP client is
//! shared across all requests of a run for connection reuse only.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use manga2pdf::{build_client, download_chapter, ChapterSelection, RunConfig};
//!
//! fn main() -> Result<(), manga2pdf::MangaError> {
//!     let config = RunConfig::builder()
//!         .url("http://example.com/my-manga")
//!         .output_dir("downloads/my-manga")
//!         .chapters(ChapterSelection::parse("9-11")?)
//!         .build()?;
//!
//!     let client = build_client(config.timeout_secs)?;
//!     for plan in config.plans() {
//!         let pdf = download_chapter(&client, &plan)?;
//!         println!("wrote {}", pdf.display());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `manga2pdf` binary (clap + anyhow + chrono + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! manga2pdf = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod chapter;
pub mod config;
pub mod error;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use chapter::{download_chapter, ChapterPlan};
pub use config::{ChapterSelection, RunConfig, RunConfigBuilder, DEFAULT_TIMEOUT_SECS};
pub use error::MangaError;
pub use pipeline::fetch::build_client;
pub use pipeline::scrape::{extract_image_links, ImageLinks};
