//! Application configuration.
//!
//! Settings are read from a TOML file. Every field has a default, so a
//! partial file (or none at all) still yields a usable [`Config`].
//!
//! ```toml
//! oraja_path = "C:/beatoraja"
//! player_path = "C:/beatoraja/player/player1"
//! autoload_offset = 6
//! difftable_nglist = ["Overjoy"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Polling cadence for the tracking loop.
pub mod polling {
    use std::time::Duration;

    /// Default interval between snapshot reload checks
    pub const DEFAULT_INTERVAL_SECS: u64 = 5;
    /// Wait between validity checks while snapshot databases are missing
    pub const SNAPSHOT_RETRY_DELAY: Duration = Duration::from_secs(10);
    /// Number of validity checks before the wait is reported as a warning
    pub const SNAPSHOT_WARN_AFTER: u32 = 3;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// beatoraja install directory (holds `songdata.db`, `songinfo.db` and `table/`)
    pub oraja_path: PathBuf,
    /// Player directory (holds `score.db`, `scorelog.db`, `scoredatalog.db`)
    pub player_path: PathBuf,
    /// Hours before startup whose plays are loaded into the session
    pub autoload_offset: u32,
    /// Difficulty tables that are never aggregated into the index
    pub difftable_nglist: Vec<String>,
    pub history_path: PathBuf,
    pub report_path: PathBuf,
    pub session_dir: PathBuf,
    pub poll_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            oraja_path: PathBuf::new(),
            player_path: PathBuf::new(),
            autoload_offset: 0,
            difftable_nglist: Vec::new(),
            history_path: PathBuf::from("history.json"),
            report_path: PathBuf::from("history.xml"),
            session_dir: PathBuf::from("sessions"),
            poll_interval_secs: polling::DEFAULT_INTERVAL_SECS,
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Directory scanned for `*.bmt` difficulty tables
    pub fn table_dir(&self) -> PathBuf {
        self.oraja_path.join("table")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_partial_config_uses_defaults() {
        let config = Config::parse(
            r#"
            oraja_path = "/games/beatoraja"
            autoload_offset = 6
            difftable_nglist = ["Overjoy", "Stella"]
            "#,
        )
        .unwrap();

        assert_eq!(config.oraja_path, PathBuf::from("/games/beatoraja"));
        assert_eq!(config.autoload_offset, 6);
        assert_eq!(config.difftable_nglist, vec!["Overjoy", "Stella"]);
        assert_eq!(config.history_path, PathBuf::from("history.json"));
        assert_eq!(config.poll_interval_secs, polling::DEFAULT_INTERVAL_SECS);
        assert_eq!(config.table_dir(), PathBuf::from("/games/beatoraja/table"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "player_path = \"/games/beatoraja/player/player1\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(
            config.player_path,
            PathBuf::from("/games/beatoraja/player/player1")
        );
    }

    #[test]
    fn test_invalid_config_is_error() {
        let err = Config::parse("autoload_offset = \"six\"").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = Config::load("/nonexistent/bmsledger.toml").unwrap_err();
        assert!(err.is_not_found());
    }
}
