//! CLI binary for manga2pdf.
//!
//! A thin shim over the library crate that maps CLI flags to a
//! `RunConfig` and reports per-chapter results.

use anyhow::{Context, Result};
use clap::Parser;
use manga2pdf::{build_client, download_chapter, ChapterSelection, RunConfig};
use std::io;
use tracing::error;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Download one chapter page into a timestamped directory
  manga2pdf http://example.com/my-manga/chapter-12

  # Download chapters 9 through 23, one PDF each
  manga2pdf -c 9-23 -o downloads/my-manga -n my-manga http://example.com/my-manga

  # Download specific chapters and keep the raw images
  manga2pdf -c 1,2,5 --keep http://example.com/my-manga

CHAPTER SPECIFIERS:
  9-23     inclusive integer range
  1,2,3    literal tokens, substituted verbatim into /chapter-{c}
  (none)   single chapter: the URL is used as-is

OUTPUT LAYOUT:
  Images land in the working directory ({output}, or {output}_ch_{c} per
  chapter); the finished PDF is written next to that directory as
  {name}.pdf (or {name}_chapter_{c}.pdf). Without --keep the images and
  the working directory are removed after assembly.
"#;

/// Download manga chapters and assemble them into grayscale PDF files.
#[derive(Parser, Debug)]
#[command(
    name = "manga2pdf",
    version,
    about = "Download manga chapters and assemble them into grayscale PDF files",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// URL of the manga chapter page.
    url: String,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "MANGA2PDF_DEBUG")]
    debug: bool,

    /// Keep the downloaded images and working directory after assembly.
    #[arg(short, long, env = "MANGA2PDF_KEEP")]
    keep: bool,

    /// Working directory for downloaded images.
    /// Default: downloads/{timestamp}.
    #[arg(short, long, env = "MANGA2PDF_OUTPUT")]
    output: Option<String>,

    /// Chapters to download, format: 9-23 or 1,2,3.
    #[arg(short, long, env = "MANGA2PDF_CHAPTERS")]
    chapters: Option<String>,

    /// Output document base name.
    #[arg(short = 'n', long, env = "MANGA2PDF_FILENAME", default_value = "out")]
    filename: String,

    /// HTTP request timeout in seconds.
    #[arg(long, env = "MANGA2PDF_TIMEOUT", default_value_t = manga2pdf::DEFAULT_TIMEOUT_SECS)]
    timeout: u64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    // A malformed --chapters specifier is the one input error that fails
    // the whole run before any network traffic.
    let chapters = cli
        .chapters
        .as_deref()
        .map(ChapterSelection::parse)
        .transpose()
        .context("invalid --chapters specifier")?;

    let output = cli.output.unwrap_or_else(|| {
        format!(
            "downloads/{}",
            chrono::Local::now().format("%Y-%m-%d-%H%M%S")
        )
    });

    let mut builder = RunConfig::builder()
        .url(cli.url)
        .output_dir(output)
        .filename(cli.filename)
        .keep_images(cli.keep)
        .timeout_secs(cli.timeout);
    if let Some(selection) = chapters {
        builder = builder.chapters(selection);
    }
    let config = builder.build().context("Invalid configuration")?;

    // ── Run chapters ─────────────────────────────────────────────────────
    let client = build_client(config.timeout_secs).context("Failed to build HTTP client")?;
    let plans = config.plans();

    let mut failed = 0usize;
    for plan in &plans {
        match download_chapter(&client, plan) {
            Ok(pdf) => eprintln!("{} {}", green("✔"), bold(&pdf.display().to_string())),
            Err(e) => {
                failed += 1;
                error!("chapter {} failed: {e}", plan.url);
                eprintln!("{} {}", red("✗"), plan.url);
            }
        }
    }

    if plans.len() > 1 {
        eprintln!(
            "{}/{} chapters downloaded",
            bold(&(plans.len() - failed).to_string()),
            plans.len()
        );
    }

    // Individual chapter failures only degrade to logging; a run where
    // nothing succeeded exits non-zero.
    if !plans.is_empty() && failed == plans.len() {
        anyhow::bail!("all {} chapter(s) failed", plans.len());
    }

    Ok(())
}
