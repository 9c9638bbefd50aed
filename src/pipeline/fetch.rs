//! HTTP client construction and page fetching.
//!
//! One blocking [`Client`] is built per run and shared across every
//! request, giving connection pooling across a whole multi-chapter run
//! without introducing any concurrency. Each call blocks until the
//! response arrives or the configured timeout fires.

use crate::error::MangaError;
use reqwest::blocking::Client;
use std::time::Duration;

pub use crate::config::DEFAULT_TIMEOUT_SECS;

/// Build the shared blocking HTTP client with a per-request timeout.
pub fn build_client(timeout_secs: u64) -> Result<Client, MangaError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| MangaError::InvalidConfig(format!("failed to build HTTP client: {e}")))
}

/// Fetch a chapter page and return its body as text.
///
/// Only transport-level failures are errors here. A non-200 page is
/// returned as-is: an error page contains no matching image links, so
/// the chapter aborts one stage later with the more useful
/// [`MangaError::NoImageLinks`].
pub fn fetch_page(client: &Client, url: &str) -> Result<String, MangaError> {
    let response = client
        .get(url)
        .send()
        .map_err(|e| MangaError::PageFetchFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    response.text().map_err(|e| MangaError::PageFetchFailed {
        url: url.to_string(),
        reason: e.to_string(),
    })
}
