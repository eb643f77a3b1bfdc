use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::session::SessionLedger;
use crate::error::{Error, Result};
use crate::play::PlayRecord;

/// Current layout of the history file
pub const HISTORY_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct HistoryFile {
    version: u32,
    /// Session start as epoch seconds; absent in hand-written files
    #[serde(default)]
    session_start: Option<i64>,
    history: Vec<PlayRecord>,
}

/// Sibling path used for the write-then-rename
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("history"));
    name.push(".tmp");
    path.with_file_name(name)
}

impl SessionLedger {
    /// Write the play history to `path`.
    ///
    /// The file is replaced atomically; on failure the previous file and
    /// the in-memory ledger are left as they were.
    pub fn persist<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = HistoryFile {
            version: HISTORY_VERSION,
            session_start: Some(self.session_start().timestamp()),
            history: self.history().to_vec(),
        };
        let content = serde_json::to_string_pretty(&file)?;

        let tmp = temp_path(path);
        fs::write(&tmp, content)
            .and_then(|()| fs::rename(&tmp, path))
            .map_err(|e| {
                let _ = fs::remove_file(&tmp);
                Error::persistence(path, e)
            })?;

        debug!("Saved {} plays to {}", file.history.len(), path.display());
        Ok(())
    }

    /// Rebuild a ledger from a history file.
    ///
    /// Records are replayed through [`SessionLedger::add`] in stored order,
    /// so the per-chart view matches the one that was saved.
    pub fn restore<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let file: HistoryFile =
            serde_json::from_str(&content).map_err(|e| Error::persistence(path, e))?;

        if file.version != HISTORY_VERSION {
            return Err(Error::persistence(
                path,
                format!("unsupported history version {}", file.version),
            ));
        }

        let session_start = file
            .session_start
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
            .map(|dt| dt.with_timezone(&Local))
            .unwrap_or_else(Local::now);

        let mut ledger = SessionLedger::starting_at(session_start);
        for record in file.history {
            ledger.add(record);
        }

        info!("Restored {} plays from {}", ledger.len(), path.display());
        Ok(ledger)
    }

    /// Restore from `path`, or start an empty ledger if that fails
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::restore(path) {
            Ok(ledger) => ledger,
            Err(e) if e.is_not_found() => {
                debug!("No history at {}, starting empty", path.display());
                Self::new()
            }
            Err(e) => {
                warn!("Failed to load history, starting empty: {}", e);
                Self::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::session::tests::record;
    use crate::play::{Lamp, PriorBest};
    use tempfile::TempDir;

    fn sample_ledger() -> SessionLedger {
        let mut ledger = SessionLedger::new();
        ledger.add(record("h1", 200, Lamp::Normal, 10, 1000));
        ledger.add(
            record("h2", 100, Lamp::Failed, 50, 1100).with_prior(PriorBest {
                score: 150,
                bp: 40,
                lamp: Lamp::Easy,
            }),
        );
        ledger.add(record("h1", 300, Lamp::AssistEasy, 4, 1200));
        ledger
    }

    #[test]
    fn test_persist_restore_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        let ledger = sample_ledger();

        ledger.persist(&path).unwrap();
        let restored = SessionLedger::restore(&path).unwrap();

        assert_eq!(restored.history(), ledger.history());
        assert_eq!(restored.merged(), ledger.merged());
        assert_eq!(restored.playtime(), ledger.playtime());
        assert_eq!(
            restored.session_start().timestamp(),
            ledger.session_start().timestamp()
        );
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn test_file_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        sample_ledger().persist(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["history"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_restore_without_session_start() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, r#"{"version":1,"history":[]}"#).unwrap();

        let ledger = SessionLedger::restore(&path).unwrap();
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_restore_rejects_unknown_version() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, r#"{"version":99,"history":[]}"#).unwrap();

        let err = SessionLedger::restore(&path).unwrap_err();
        assert!(matches!(err, Error::Persistence { .. }));
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let dir = TempDir::new().unwrap();

        let missing = dir.path().join("missing.json");
        assert!(SessionLedger::load_or_default(&missing).is_empty());

        let corrupt = dir.path().join("corrupt.json");
        fs::write(&corrupt, "{ not json").unwrap();
        assert!(matches!(
            SessionLedger::restore(&corrupt),
            Err(Error::Persistence { .. })
        ));
        assert!(SessionLedger::load_or_default(&corrupt).is_empty());
    }

    #[test]
    fn test_persist_into_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no_such_dir").join("history.json");

        let err = sample_ledger().persist(&path).unwrap_err();
        assert!(matches!(err, Error::Persistence { .. }));
    }
}
