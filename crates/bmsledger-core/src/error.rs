use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Malformed difficulty table {path:?}: {message}")]
    CatalogFormat { path: PathBuf, message: String },

    #[error("Snapshot database unavailable: {0}")]
    SnapshotUnavailable(PathBuf),

    #[error("No song metadata for hash {sha256}")]
    RowResolution { sha256: String },

    #[error("History file {path:?} could not be used: {message}")]
    Persistence { path: PathBuf, message: String },

    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if this error is a "file not found" error
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            Error::SnapshotUnavailable(_) => true,
            _ => false,
        }
    }

    pub(crate) fn catalog<P: Into<PathBuf>>(path: P, message: impl ToString) -> Self {
        Error::CatalogFormat {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn persistence<P: Into<PathBuf>>(path: P, message: impl ToString) -> Self {
        Error::Persistence {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
