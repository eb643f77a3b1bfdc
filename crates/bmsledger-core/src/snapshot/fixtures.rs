//! Throwaway snapshot databases for tests

use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use rusqlite::Connection;
use tempfile::TempDir;

use super::{PlayLogRow, SnapshotPaths};

const SCORE_SCHEMA: &str = "CREATE TABLE score (
    sha256 TEXT, mode INTEGER, clear INTEGER,
    epg INTEGER, lpg INTEGER, egr INTEGER, lgr INTEGER, egd INTEGER, lgd INTEGER,
    ebd INTEGER, lbd INTEGER, epr INTEGER, lpr INTEGER, ems INTEGER, lms INTEGER,
    notes INTEGER, minbp INTEGER, playcount INTEGER, date INTEGER)";

const PLAY_LOG_SCHEMA: &str = "CREATE TABLE scoredatalog (
    sha256 TEXT, mode INTEGER, clear INTEGER,
    epg INTEGER, lpg INTEGER, egr INTEGER, lgr INTEGER, egd INTEGER, lgd INTEGER,
    ebd INTEGER, lbd INTEGER, epr INTEGER, lpr INTEGER, ems INTEGER, lms INTEGER,
    notes INTEGER, playcount INTEGER, date INTEGER)";

const SCORE_LOG_SCHEMA: &str = "CREATE TABLE scorelog (
    sha256 TEXT, mode INTEGER, clear INTEGER, oldclear INTEGER, score INTEGER,
    oldscore INTEGER, combo INTEGER, oldcombo INTEGER, minbp INTEGER, oldminbp INTEGER,
    date INTEGER)";

const SONG_SCHEMA: &str = "CREATE TABLE song (
    md5 TEXT, sha256 TEXT, title TEXT, subtitle TEXT, length INTEGER, notes INTEGER)";

const INFORMATION_SCHEMA: &str = "CREATE TABLE information (
    sha256 TEXT, n INTEGER, ln INTEGER, s INTEGER, ls INTEGER, total REAL,
    density REAL, mainbpm REAL)";

pub(crate) struct SnapshotFixture {
    dir: TempDir,
}

impl SnapshotFixture {
    pub(crate) fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let fixture = Self { dir };
        let paths = fixture.paths();
        for (path, schema) in [
            (&paths.score, SCORE_SCHEMA),
            (&paths.scoredatalog, PLAY_LOG_SCHEMA),
            (&paths.scorelog, SCORE_LOG_SCHEMA),
            (&paths.songdata, SONG_SCHEMA),
            (&paths.songinfo, INFORMATION_SCHEMA),
        ] {
            Connection::open(path).unwrap().execute_batch(schema).unwrap();
        }
        fixture
    }

    pub(crate) fn paths(&self) -> SnapshotPaths {
        SnapshotPaths::new(self.dir.path(), self.dir.path())
    }

    /// Song with 1000 notes in its metadata
    pub(crate) fn add_song(&self, sha256: &str, md5: &str, title: &str, length_ms: i64) {
        Connection::open(self.paths().songdata)
            .unwrap()
            .execute(
                "INSERT INTO song VALUES (?1, ?2, ?3, '', ?4, 1000)",
                (md5, sha256, title, length_ms),
            )
            .unwrap();
    }

    pub(crate) fn add_score(&self, sha256: &str, notes: u32) {
        Connection::open(self.paths().score)
            .unwrap()
            .execute(
                "INSERT INTO score (sha256, mode, clear, notes, minbp, playcount, date)
                 VALUES (?1, 0, 0, ?2, 0, 1, 0)",
                (sha256, notes),
            )
            .unwrap();
    }

    /// `oldminbp` of `None` is stored as NULL
    pub(crate) fn add_score_log(
        &self,
        sha256: &str,
        oldscore: u32,
        oldminbp: Option<u32>,
        oldclear: i64,
    ) {
        Connection::open(self.paths().scorelog)
            .unwrap()
            .execute(
                "INSERT INTO scorelog (sha256, oldscore, oldminbp, oldclear, date)
                 VALUES (?1, ?2, ?3, ?4, 0)",
                (sha256, oldscore, oldminbp, oldclear),
            )
            .unwrap();
    }

    /// Move the file's modification time `secs` into the future
    pub(crate) fn touch(&self, path: &Path, secs: u64) {
        let file = fs::File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::now() + Duration::from_secs(secs))
            .unwrap();
    }

    pub(crate) fn add_play(&self, row: &PlayLogRow) {
        let conn = Connection::open(self.paths().scoredatalog).unwrap();
        let [epg, egr, egd, ebd, epr, ems] = row.timing.early;
        let [lpg, lgr, lgd, lbd, lpr, lms] = row.timing.late;
        conn.execute(
            "INSERT INTO scoredatalog VALUES
             (?1, 0, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
            rusqlite::params![
                row.sha256,
                row.clear,
                epg,
                lpg,
                egr,
                lgr,
                egd,
                lgd,
                ebd,
                lbd,
                epr,
                lpr,
                ems,
                lms,
                row.notes,
                row.playcount,
                row.date
            ],
        )
        .unwrap();
    }
}
