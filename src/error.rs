//! Error types for rs-blogwatch.
//!
//! Detection itself never fails: a page without a recognisable post yields
//! `None`. These errors only surface at the I/O boundary, when loading the
//! manual selector table.

use std::path::PathBuf;

/// Error type for manual selector store operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The manual selector file exists but could not be read.
    #[error("failed to read manual selectors from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manual selector table is not valid JSON of the expected shape.
    #[error("invalid manual selector table: {0}")]
    Json(#[from] serde_json::Error),

    /// A URL handed to the library could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, Error>;
