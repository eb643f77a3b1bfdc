use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use rusqlite::{Connection, OpenFlags};
use tracing::{debug, info, warn};

use super::rows::SnapshotRow;
use crate::error::{Error, Result};

/// Load state of one snapshot table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceState {
    /// Rows match the file as of the last load
    Fresh,
    /// The file changed (or was never loaded) since the rows were read
    Stale,
    /// A full reload is in progress
    Reloading,
}

/// One table of an external SQLite database, reloaded when its file changes
#[derive(Debug)]
pub struct SnapshotSource<T> {
    path: PathBuf,
    state: SourceState,
    loaded_mtime: Option<SystemTime>,
    rows: Vec<T>,
    by_hash: HashMap<String, Vec<usize>>,
}

impl<T: SnapshotRow> SnapshotSource<T> {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            state: SourceState::Stale,
            loaded_mtime: None,
            rows: Vec::new(),
            by_hash: HashMap::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> SourceState {
        self.state
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Reload the table if its file changed since the last load.
    ///
    /// Returns whether rows were reloaded. A missing file leaves the
    /// current rows and state untouched and reports `SnapshotUnavailable`.
    pub fn refresh(&mut self) -> Result<bool> {
        let mtime = fs::metadata(&self.path)
            .and_then(|meta| meta.modified())
            .map_err(|_| Error::SnapshotUnavailable(self.path.clone()))?;

        if self.loaded_mtime.is_some_and(|loaded| mtime <= loaded) {
            self.state = SourceState::Fresh;
            return Ok(false);
        }

        self.state = SourceState::Reloading;
        match load_rows::<T>(&self.path) {
            Ok(rows) => {
                info!(
                    "Reloaded {} ({} rows from {})",
                    T::TABLE,
                    rows.len(),
                    self.path.display()
                );
                self.set_rows(rows);
                self.loaded_mtime = Some(mtime);
                self.state = SourceState::Fresh;
                Ok(true)
            }
            Err(e) => {
                warn!("Failed to reload {}: {}", T::TABLE, e);
                self.state = SourceState::Stale;
                Err(e)
            }
        }
    }

    fn set_rows(&mut self, rows: Vec<T>) {
        self.by_hash.clear();
        for (i, row) in rows.iter().enumerate() {
            self.by_hash.entry(row.sha256().to_string()).or_default().push(i);
        }
        self.rows = rows;
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    /// Rows for `sha256` in table order
    pub fn rows_for<'a>(&'a self, sha256: &str) -> impl Iterator<Item = &'a T> + 'a {
        self.by_hash
            .get(sha256)
            .into_iter()
            .flatten()
            .map(|&i| &self.rows[i])
    }

    /// Most recent row for `sha256`
    pub fn latest(&self, sha256: &str) -> Option<&T> {
        self.by_hash
            .get(sha256)
            .and_then(|indices| indices.last())
            .map(|&i| &self.rows[i])
    }
}

fn load_rows<T: SnapshotRow>(path: &Path) -> Result<Vec<T>> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    let mut stmt = conn.prepare(&T::select_sql())?;
    let rows = stmt
        .query_map([], |row| T::from_row(row))?
        .collect::<rusqlite::Result<Vec<T>>>()?;
    debug!("Read {} rows from {}", rows.len(), T::TABLE);
    Ok(rows)
}
