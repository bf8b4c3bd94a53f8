//! Error type shared by the loaders.
//!
//! The motion model itself never fails; only file-backed collaborators
//! (questions, settings, asset manifests) produce errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or saving game data.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading or writing a file failed.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        /// File that was being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A JSON document could not be parsed or written.
    #[error("malformed JSON in {}: {source}", path.display())]
    Json {
        /// File that held the document.
        path: PathBuf,
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },
    /// The question CSV header lacks a required column.
    #[error("question CSV is missing the `{0}` column")]
    MissingColumn(&'static str),
    /// A quoted CSV field was never closed.
    #[error("unterminated quoted field starting on line {line}")]
    UnterminatedQuote {
        /// 1-based line where the field opened.
        line: usize,
    },
    /// The manifest has no entry for the requested role.
    #[error("no asset declared for role `{0}`")]
    UnknownAssetRole(String),
    /// The manifest entry points at a file that does not exist.
    #[error("asset for role `{role}` not found at {}", path.display())]
    MissingAsset {
        /// Logical role that was requested.
        role: String,
        /// Resolved path that was checked.
        path: PathBuf,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
