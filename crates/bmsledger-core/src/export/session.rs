use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::info;

use super::format::ExportFormat;
use super::tsv::TsvExporter;
use crate::error::Result;
use crate::play::PlayRecord;

/// Per-run play log under `<base_dir>/<date>/session_<time>.<ext>`
pub struct SessionManager {
    base_dir: PathBuf,
    format: Box<dyn ExportFormat>,
    current_session: Option<PathBuf>,
}

impl SessionManager {
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self::with_format(base_dir, TsvExporter)
    }

    pub fn with_format<P: AsRef<Path>, F: ExportFormat + 'static>(base_dir: P, format: F) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            format: Box::new(format),
            current_session: None,
        }
    }

    pub fn start_session(&mut self) -> Result<PathBuf> {
        self.start_session_at(Local::now())
    }

    /// Create the session file, writing the format's header if it has one
    pub fn start_session_at(&mut self, now: DateTime<Local>) -> Result<PathBuf> {
        let session_dir = self.base_dir.join(now.format("%Y-%m-%d").to_string());
        fs::create_dir_all(&session_dir)?;

        let session_file = session_dir.join(format!(
            "session_{}.{}",
            now.format("%H%M%S"),
            self.format.extension()
        ));
        self.current_session = Some(session_file.clone());
        if let Some(header) = self.format.header() {
            self.append_line(&header)?;
        }

        info!("Logging plays to {}", session_file.display());
        Ok(session_file)
    }

    /// Append `record`; a no-op before [`start_session`](Self::start_session)
    pub fn append(&self, record: &PlayRecord) -> Result<()> {
        self.append_line(&self.format.format_row(record))
    }

    pub fn append_line(&self, line: &str) -> Result<()> {
        if let Some(ref path) = self.current_session {
            let mut file = fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            writeln!(file, "{}", line)?;
        }
        Ok(())
    }

    pub fn current_session_path(&self) -> Option<&Path> {
        self.current_session.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::JsonExporter;
    use crate::play::{Judge, Lamp};
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn record(ts: i64) -> PlayRecord {
        PlayRecord::new(
            "Song",
            "abc",
            Judge::from_array([100, 0, 0, 0, 0, 0]),
            100,
            Lamp::FullCombo,
            Some(90.0),
            ts,
        )
    }

    #[test]
    fn test_session_file_layout() {
        let dir = TempDir::new().unwrap();
        let mut sessions = SessionManager::new(dir.path());
        let now = Local.with_ymd_and_hms(2024, 3, 9, 21, 5, 7).unwrap();

        let path = sessions.start_session_at(now).unwrap();
        assert_eq!(path, dir.path().join("2024-03-09").join("session_210507.tsv"));
        assert_eq!(sessions.current_session_path(), Some(path.as_path()));

        sessions.append(&record(1)).unwrap();
        sessions.append(&record(2)).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("date\t"));
    }

    #[test]
    fn test_json_session_has_no_header() {
        let dir = TempDir::new().unwrap();
        let mut sessions = SessionManager::with_format(dir.path(), JsonExporter);
        let path = sessions.start_session().unwrap();
        assert_eq!(path.extension().unwrap(), "jsonl");

        sessions.append(&record(1)).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 1);
    }

    #[test]
    fn test_append_before_start_is_noop() {
        let dir = TempDir::new().unwrap();
        let sessions = SessionManager::new(dir.path());
        sessions.append(&record(1)).unwrap();
        assert!(sessions.current_session_path().is_none());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
