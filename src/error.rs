//! Error types for storypdf operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a download. There is no partial output: the first
/// failure ends the run.
#[derive(Error, Debug)]
pub enum Error {
    #[error("could not detect a story id in {0:?}; please use the canonical story link")]
    MissingStoryId(String),

    #[error("couldn't locate the story title on the page")]
    MissingTitle,

    #[error("couldn't find any public parts in the table of contents")]
    NoChapters,

    #[error("empty response for part {0}")]
    EmptyChapter(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] ureq::Error),

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("invalid storytext payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF rendering failed: {0}")]
    Pdf(#[from] genpdf::error::Error),

    #[error("no .ttf fonts found in {}", .0.display())]
    NoFonts(PathBuf),

    #[error("invalid selector: {0}")]
    InvalidSelector(String),
}

pub type Result<T> = std::result::Result<T, Error>;
