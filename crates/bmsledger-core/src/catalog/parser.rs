use std::fs;
use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// File extension of difficulty table documents
pub const CATALOG_EXTENSION: &str = "bmt";

/// One decoded difficulty table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogTable {
    pub name: String,
    #[serde(rename = "folder", default)]
    pub folders: Vec<Folder>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub songs: Vec<CatalogSong>,
}

/// Chart entry of a folder. Tables disagree on which hash they carry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSong {
    #[serde(default)]
    pub sha256: Option<String>,
    #[serde(default)]
    pub md5: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl CatalogSong {
    /// Every non-empty hash spelling of this entry
    pub fn hashes(&self) -> impl Iterator<Item = &str> {
        [self.sha256.as_deref(), self.md5.as_deref()]
            .into_iter()
            .flatten()
            .filter(|h| !h.is_empty())
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }
}

/// Decode a gzip-compressed table document.
///
/// `origin` is only used to label errors.
pub fn parse_document(bytes: &[u8], origin: &Path) -> Result<CatalogTable> {
    let mut json = String::new();
    GzDecoder::new(bytes)
        .read_to_string(&mut json)
        .map_err(|e| Error::catalog(origin, format!("decompression failed: {}", e)))?;

    serde_json::from_str(&json).map_err(|e| Error::catalog(origin, e))
}

/// Read and decode one table file
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<CatalogTable> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| Error::catalog(path, e))?;
    parse_document(&bytes, path)
}

/// Load every table in `dir`, in file name order.
///
/// Unreadable or malformed tables are logged and skipped.
pub fn load_catalogs<P: AsRef<Path>>(dir: P) -> Vec<CatalogTable> {
    let dir = dir.as_ref();
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Cannot read table directory {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut paths: Vec<_> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(CATALOG_EXTENSION))
        })
        .collect();
    paths.sort();

    let mut catalogs = Vec::with_capacity(paths.len());
    for path in paths {
        match load_catalog(&path) {
            Ok(table) => {
                debug!("Parsed table '{}' from {}", table.name, path.display());
                catalogs.push(table);
            }
            Err(e) => warn!("Skipping table {}: {}", path.display(), e),
        }
    }
    catalogs
}
