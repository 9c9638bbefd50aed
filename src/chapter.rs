//! Chapter orchestration: run the pipeline stages for one chapter.
//!
//! A chapter moves through a fixed sequence (fetch links, prepare the
//! working directory, download, normalize, assemble, optional cleanup)
//! and any failure abandons it without producing a document. Chapters are
//! independent: the only state shared between them is the HTTP client.

use crate::config::RunConfig;
use crate::error::MangaError;
use crate::pipeline::{assemble, download, grayscale, scrape};
use reqwest::blocking::Client;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Everything needed to download one chapter, derived from the run
/// configuration. Created once per chapter and never mutated.
#[derive(Debug, Clone)]
pub struct ChapterPlan {
    /// Chapter page URL.
    pub url: String,
    /// Directory the images are downloaded into.
    pub work_dir: PathBuf,
    /// Output document base name, without extension.
    pub filename: String,
    /// Keep the images and working directory after assembly.
    pub keep: bool,
}

impl ChapterPlan {
    /// Derive the plan for chapter token `chapter`, or for the bare base
    /// configuration when `None` (single-chapter mode).
    pub fn derive(config: &RunConfig, chapter: Option<&str>) -> Self {
        match chapter {
            None => ChapterPlan {
                url: config.url.clone(),
                work_dir: PathBuf::from(&config.output_dir),
                filename: config.filename.clone(),
                keep: config.keep_images,
            },
            Some(c) => ChapterPlan {
                url: format!("{}/chapter-{c}", config.url),
                work_dir: PathBuf::from(format!("{}_ch_{c}", config.output_dir)),
                filename: format!("{}_chapter_{c}", config.filename),
                keep: config.keep_images,
            },
        }
    }
}

impl RunConfig {
    /// Expand this configuration into per-chapter plans, in download order.
    pub fn plans(&self) -> Vec<ChapterPlan> {
        match &self.chapters {
            None => vec![ChapterPlan::derive(self, None)],
            Some(selection) => selection
                .expand()
                .iter()
                .map(|c| ChapterPlan::derive(self, Some(c)))
                .collect(),
        }
    }
}

/// Download one chapter and assemble it into a PDF.
///
/// Returns the path the document was written to. On any error the chapter
/// is abandoned with no document; earlier stages may have left files in
/// the working directory.
pub fn download_chapter(client: &Client, plan: &ChapterPlan) -> Result<PathBuf, MangaError> {
    info!("downloading chapter {}", plan.url);

    let links = scrape::scrape_image_links(client, &plan.url)?;
    if links.is_empty() {
        return Err(MangaError::NoImageLinks {
            url: plan.url.clone(),
        });
    }
    debug!("image urls: {:?}", links.urls);

    prepare_work_dir(&plan.work_dir)?;

    let saved = download::download_images(client, &links, &plan.work_dir);
    info!("downloaded {saved}/{} images", links.len());

    grayscale::normalize_directory(&plan.work_dir)?;

    let images = assemble::collect_ordered_images(&plan.work_dir)?;
    let output = output_path(&plan.work_dir, &plan.filename);
    assemble::assemble_pdf(&images, &output, &plan.filename)?;

    if !plan.keep {
        info!("removing image files");
        download::remove_images(&plan.work_dir, links.ext)?;
    }

    Ok(output)
}

/// Where the document lands: next to the working directory, not inside
/// it. Built from the parent component so the returned path stays
/// resolvable after cleanup removes the working directory; a literal
/// `..` segment would dangle once its anchor is gone.
fn output_path(work_dir: &Path, filename: &str) -> PathBuf {
    let parent = match work_dir.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    parent.join(format!("{filename}.pdf"))
}

/// Create the working directory if needed. Re-using an existing directory
/// is fine; an existing non-directory is not.
fn prepare_work_dir(dir: &Path) -> Result<(), MangaError> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| MangaError::Io {
            path: dir.to_path_buf(),
            source: e,
        })
    } else if !dir.is_dir() {
        Err(MangaError::DirectoryConflict {
            path: dir.to_path_buf(),
        })
    } else {
        Ok(())
    }
}
