//! Configuration types for a download run.
//!
//! All run behaviour is controlled through [`RunConfig`], built via its
//! [`RunConfigBuilder`]. One struct per run keeps the CLI mapping trivial
//! and makes two runs easy to diff when their outputs differ.

use crate::error::MangaError;
use std::fmt;
use std::str::FromStr;

/// Default per-request HTTP timeout in seconds.
///
/// A network-bound tool with no timeout can hang forever on a stalled
/// connection, so callers get a 30 s ceiling unless they ask otherwise.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for one invocation of the downloader.
///
/// Built via [`RunConfig::builder()`].
///
/// # Example
/// ```rust
/// use manga2pdf::{ChapterSelection, RunConfig};
///
/// let config = RunConfig::builder()
///     .url("http://example.com/my-manga")
///     .output_dir("downloads/my-manga")
///     .chapters(ChapterSelection::parse("9-11").unwrap())
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Base chapter page URL. In multi-chapter mode `/chapter-{c}` is
    /// appended per chapter.
    pub url: String,

    /// Base working-directory path. In multi-chapter mode `_ch_{c}` is
    /// appended per chapter. Downloaded images live here; the PDF is
    /// written as a sibling of this directory.
    pub output_dir: String,

    /// Output document base name (without extension). Default: `"out"`.
    /// In multi-chapter mode `_chapter_{c}` is appended per chapter.
    pub filename: String,

    /// Keep the downloaded image files and the working directory after
    /// assembly. Default: false (cleanup).
    pub keep_images: bool,

    /// Which chapters to download. `None` means single-chapter mode: the
    /// base URL/output/filename are used unmodified.
    pub chapters: Option<ChapterSelection>,

    /// Per-request HTTP timeout in seconds. Default: 30.
    pub timeout_secs: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            output_dir: "downloads".to_string(),
            filename: "out".to_string(),
            keep_images: false,
            chapters: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl RunConfig {
    /// Create a new builder for `RunConfig`.
    pub fn builder() -> RunConfigBuilder {
        RunConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`RunConfig`].
#[derive(Debug)]
pub struct RunConfigBuilder {
    config: RunConfig,
}

impl RunConfigBuilder {
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.config.url = url.into();
        self
    }

    pub fn output_dir(mut self, dir: impl Into<String>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn filename(mut self, name: impl Into<String>) -> Self {
        self.config.filename = name.into();
        self
    }

    pub fn keep_images(mut self, keep: bool) -> Self {
        self.config.keep_images = keep;
        self
    }

    pub fn chapters(mut self, selection: ChapterSelection) -> Self {
        self.config.chapters = Some(selection);
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs.max(1);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<RunConfig, MangaError> {
        let c = &self.config;
        if c.url.is_empty() {
            return Err(MangaError::InvalidConfig("URL must not be empty".into()));
        }
        if c.filename.is_empty() {
            return Err(MangaError::InvalidConfig(
                "Output file name must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}

// ── Chapter selection ────────────────────────────────────────────────────

/// Which chapters a `--chapters` specifier names.
///
/// The grammar is evaluated in this precedence:
/// 1. contains `,` → a list of literal tokens, substituted verbatim into
///    the per-chapter URL/output/filename (tokens need not be numeric);
/// 2. contains `-` → exactly two integer tokens `lo-hi`, expanded to the
///    inclusive range `[lo, hi]`;
/// 3. anything else → a single literal token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChapterSelection {
    /// Literal chapter tokens, in the order given.
    List(Vec<String>),
    /// Inclusive integer range.
    Range(u32, u32),
}

impl ChapterSelection {
    /// Parse a `--chapters` specifier.
    ///
    /// Range specifiers fail fast on non-integer tokens or a token count
    /// other than two; list tokens are never validated (they are
    /// substituted verbatim).
    pub fn parse(spec: &str) -> Result<Self, MangaError> {
        if spec.contains(',') {
            return Ok(ChapterSelection::List(
                spec.split(',').map(str::to_string).collect(),
            ));
        }

        if spec.contains('-') {
            let tokens: Vec<&str> = spec.split('-').collect();
            if tokens.len() != 2 {
                return Err(MangaError::InvalidChapterSpec {
                    spec: spec.to_string(),
                    detail: format!("expected exactly two tokens, got {}", tokens.len()),
                });
            }
            let lo: u32 = tokens[0].parse().map_err(|_| MangaError::InvalidChapterSpec {
                spec: spec.to_string(),
                detail: format!("non-integer token '{}'", tokens[0]),
            })?;
            let hi: u32 = tokens[1].parse().map_err(|_| MangaError::InvalidChapterSpec {
                spec: spec.to_string(),
                detail: format!("non-integer token '{}'", tokens[1]),
            })?;
            return Ok(ChapterSelection::Range(lo, hi));
        }

        // A bare token is read as a one-element list.
        Ok(ChapterSelection::List(vec![spec.to_string()]))
    }

    /// Expand the selection into chapter tokens, in download order.
    ///
    /// An inverted range (`lo > hi`) expands to nothing.
    pub fn expand(&self) -> Vec<String> {
        match self {
            ChapterSelection::List(tokens) => tokens.clone(),
            ChapterSelection::Range(lo, hi) => (*lo..=*hi).map(|c| c.to_string()).collect(),
        }
    }
}

impl FromStr for ChapterSelection {
    type Err = MangaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChapterSelection::parse(s)
    }
}

impl fmt::Display for ChapterSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChapterSelection::List(tokens) => write!(f, "{}", tokens.join(",")),
            ChapterSelection::Range(lo, hi) => write!(f, "{lo}-{hi}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_expands_inclusively() {
        let sel = ChapterSelection::parse("9-11").unwrap();
        assert_eq!(sel, ChapterSelection::Range(9, 11));
        assert_eq!(sel.expand(), vec!["9", "10", "11"]);
    }

    #[test]
    fn list_keeps_tokens_verbatim_and_in_order() {
        let sel = ChapterSelection::parse("1,2,3").unwrap();
        assert_eq!(sel.expand(), vec!["1", "2", "3"]);

        // Tokens are not trimmed and need not be numeric.
        let sel = ChapterSelection::parse("extra, 2,final").unwrap();
        assert_eq!(sel.expand(), vec!["extra", " 2", "final"]);
    }

    #[test]
    fn comma_takes_precedence_over_dash() {
        let sel = ChapterSelection::parse("1-3,5").unwrap();
        assert_eq!(sel.expand(), vec!["1-3", "5"]);
    }

    #[test]
    fn bare_token_is_a_single_literal() {
        let sel = ChapterSelection::parse("42").unwrap();
        assert_eq!(sel.expand(), vec!["42"]);
    }

    #[test]
    fn non_integer_range_token_fails_fast() {
        let err = ChapterSelection::parse("1-x").unwrap_err();
        assert!(matches!(err, MangaError::InvalidChapterSpec { .. }));
        assert!(err.to_string().contains("'x'"));
    }

    #[test]
    fn range_with_three_tokens_fails_fast() {
        let err = ChapterSelection::parse("1-2-3").unwrap_err();
        assert!(matches!(err, MangaError::InvalidChapterSpec { .. }));
    }

    #[test]
    fn inverted_range_expands_to_nothing() {
        let sel = ChapterSelection::parse("5-3").unwrap();
        assert!(sel.expand().is_empty());
    }

    #[test]
    fn builder_rejects_empty_url() {
        let err = RunConfig::builder().build().unwrap_err();
        assert!(matches!(err, MangaError::InvalidConfig(_)));
    }

    #[test]
    fn builder_clamps_timeout_to_at_least_one_second() {
        let config = RunConfig::builder()
            .url("http://example.com/m")
            .timeout_secs(0)
            .build()
            .unwrap();
        assert_eq!(config.timeout_secs, 1);
    }
}
