//! Link extraction: find the chapter's image URLs in an HTML page.
//!
//! The source site serves one `<img>` per page with a `src` ending in a
//! purely numeric filename (`…/0.jpg`, `…/1.jpg`, …). Extraction filters
//! every image source against that pattern, preferring the `.jpg` set and
//! falling back to `.png`.
//!
//! The patterns and selectors are compiled once and owned by this module;
//! nothing here is mutable across chapters.

use crate::error::MangaError;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::blocking::Client;
use scraper::{Html, Selector};
use tracing::{debug, info};

use super::fetch;

/// Matches any path whose final segment is digits-only with a `.jpg`
/// suffix. Anchored at the start only; a query string after the suffix
/// still matches.
static RE_JPG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^.*/[0-9]*\.jpg").unwrap());
static RE_PNG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^.*/[0-9]*\.png").unwrap());

static SEL_IMG: Lazy<Selector> = Lazy::new(|| Selector::parse("img").unwrap());
static SEL_TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("title").unwrap());

/// The ordered image URLs for one chapter plus the file extension their
/// downloads are saved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageLinks {
    /// Image URLs in document order.
    pub urls: Vec<String>,
    /// Extension used for the files on disk, including the dot.
    pub ext: &'static str,
}

impl ImageLinks {
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }
}

/// Fetch a chapter page and extract its image links.
pub fn scrape_image_links(client: &Client, url: &str) -> Result<ImageLinks, MangaError> {
    let html = fetch::fetch_page(client, url)?;
    Ok(extract_image_links(&html))
}

/// Extract image links from an HTML document.
///
/// Every `<img src>` is trimmed and matched against the `.jpg` pattern
/// first; if that set is empty the `.png` pattern is tried. Either way
/// the chosen extension label is `.jpg`: the site serves JPEG data
/// under `.png` URLs, so the label intentionally stays `.jpg` even for
/// the fallback set.
pub fn extract_image_links(html: &str) -> ImageLinks {
    let document = Html::parse_document(html);

    if let Some(title) = document.select(&SEL_TITLE).next() {
        info!("page title: {}", title.text().collect::<String>().trim());
    }

    let sources: Vec<&str> = document
        .select(&SEL_IMG)
        .filter_map(|img| img.value().attr("src"))
        .map(str::trim)
        .collect();
    debug!("found {} <img> elements", sources.len());

    let jpg: Vec<String> = sources
        .iter()
        .filter(|src| RE_JPG.is_match(src))
        .map(|src| src.to_string())
        .collect();
    if !jpg.is_empty() {
        return ImageLinks {
            urls: jpg,
            ext: ".jpg",
        };
    }

    let png: Vec<String> = sources
        .iter()
        .filter(|src| RE_PNG.is_match(src))
        .map(|src| src.to_string())
        .collect();
    ImageLinks {
        urls: png,
        ext: ".jpg",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(body: &str) -> String {
        format!("<html><head><title>ch</title></head><body>{body}</body></html>")
    }

    #[test]
    fn jpg_matches_are_returned_in_document_order() {
        let html = page(
            r#"<img src="http://cdn.example.com/m/0.jpg">
               <img src="http://cdn.example.com/m/1.jpg">
               <img src="http://cdn.example.com/banner.gif">
               <img src="http://cdn.example.com/m/2.jpg">"#,
        );
        let links = extract_image_links(&html);
        assert_eq!(
            links.urls,
            vec![
                "http://cdn.example.com/m/0.jpg",
                "http://cdn.example.com/m/1.jpg",
                "http://cdn.example.com/m/2.jpg",
            ]
        );
        assert_eq!(links.ext, ".jpg");
    }

    #[test]
    fn src_is_trimmed_before_matching() {
        let html = page(r#"<img src="  http://cdn.example.com/m/7.jpg  ">"#);
        let links = extract_image_links(&html);
        assert_eq!(links.urls, vec!["http://cdn.example.com/m/7.jpg"]);
    }

    #[test]
    fn non_numeric_filenames_are_filtered_out() {
        let html = page(
            r#"<img src="http://cdn.example.com/logo.jpg">
               <img src="http://cdn.example.com/m/page-1.jpg">"#,
        );
        let links = extract_image_links(&html);
        assert!(links.is_empty());
    }

    #[test]
    fn png_fallback_keeps_the_jpg_label() {
        let html = page(
            r#"<img src="http://cdn.example.com/m/0.png">
               <img src="http://cdn.example.com/m/1.png">"#,
        );
        let links = extract_image_links(&html);
        assert_eq!(
            links.urls,
            vec![
                "http://cdn.example.com/m/0.png",
                "http://cdn.example.com/m/1.png",
            ]
        );
        // Compatibility quirk: the site serves JPEG data under .png URLs.
        assert_eq!(links.ext, ".jpg");
    }

    #[test]
    fn jpg_set_wins_over_png_set() {
        let html = page(
            r#"<img src="http://cdn.example.com/m/0.png">
               <img src="http://cdn.example.com/m/1.jpg">"#,
        );
        let links = extract_image_links(&html);
        assert_eq!(links.urls, vec!["http://cdn.example.com/m/1.jpg"]);
    }

    #[test]
    fn page_without_matches_yields_empty_set() {
        let links = extract_image_links(&page("<p>no images here</p>"));
        assert!(links.is_empty());
        assert_eq!(links.len(), 0);
    }
}
