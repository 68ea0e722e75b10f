//! Catalog source error types.

use std::path::PathBuf;

use crate::domain::{CatalogError, InvalidLineColor};

/// Errors that can occur while loading a catalog. All are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid catalog JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// A line's colour is not a CSS hex colour
    #[error("line {line}: {source}")]
    InvalidColor {
        line: String,
        #[source]
        source: InvalidLineColor,
    },

    /// The lines do not form a valid catalog
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl From<serde_json::Error> for SourceError {
    fn from(e: serde_json::Error) -> Self {
        SourceError::Json {
            message: e.to_string(),
        }
    }
}
