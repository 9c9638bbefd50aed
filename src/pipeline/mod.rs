//! The per-chapter download pipeline, one module per stage.
//!
//! Stages run strictly in order and communicate through the working
//! directory on disk; no stage holds state across chapters except the
//! shared HTTP client.

pub mod assemble;
pub mod download;
pub mod fetch;
pub mod grayscale;
pub mod scrape;
