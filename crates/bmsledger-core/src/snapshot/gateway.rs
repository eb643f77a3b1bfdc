use std::path::{Path, PathBuf};

use tracing::warn;

use super::rows::{InformationRow, PlayLogRow, ScoreLogRow, ScoreRow, SongRow};
use super::source::{SnapshotSource, SourceState};
use crate::config::Config;
use crate::error::{Error, Result};

/// Locations of the five snapshot databases
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotPaths {
    pub score: PathBuf,
    pub scorelog: PathBuf,
    pub scoredatalog: PathBuf,
    pub songdata: PathBuf,
    pub songinfo: PathBuf,
}

impl SnapshotPaths {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(oraja_path: P, player_path: Q) -> Self {
        let oraja = oraja_path.as_ref();
        let player = player_path.as_ref();
        Self {
            score: player.join("score.db"),
            scorelog: player.join("scorelog.db"),
            scoredatalog: player.join("scoredatalog.db"),
            songdata: oraja.join("songdata.db"),
            songinfo: oraja.join("songinfo.db"),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.oraja_path, &config.player_path)
    }
}

/// All snapshot tables, each reloaded independently
#[derive(Debug)]
pub struct SnapshotGateway {
    score: SnapshotSource<ScoreRow>,
    scorelog: SnapshotSource<ScoreLogRow>,
    scoredatalog: SnapshotSource<PlayLogRow>,
    song: SnapshotSource<SongRow>,
    information: SnapshotSource<InformationRow>,
    /// Set when `score` or `scoredatalog` reloads, cleared once plays are ingested
    plays_pending: bool,
}

impl SnapshotGateway {
    pub fn new(paths: SnapshotPaths) -> Self {
        Self {
            score: SnapshotSource::new(paths.score),
            scorelog: SnapshotSource::new(paths.scorelog),
            scoredatalog: SnapshotSource::new(paths.scoredatalog),
            song: SnapshotSource::new(paths.songdata),
            information: SnapshotSource::new(paths.songinfo),
            plays_pending: false,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(SnapshotPaths::from_config(config))
    }

    /// True when every backing database file exists
    pub fn is_valid(&self) -> bool {
        self.missing().is_empty()
    }

    /// Backing files that do not exist
    pub fn missing(&self) -> Vec<&Path> {
        let sources = [
            (self.score.exists(), self.score.path()),
            (self.scorelog.exists(), self.scorelog.path()),
            (self.scoredatalog.exists(), self.scoredatalog.path()),
            (self.song.exists(), self.song.path()),
            (self.information.exists(), self.information.path()),
        ];
        sources
            .into_iter()
            .filter(|(exists, _)| !exists)
            .map(|(_, path)| path)
            .collect()
    }

    /// Reload every table whose file changed.
    ///
    /// Returns whether the `score` table was reloaded, i.e. whether new
    /// plays may exist. Every source is attempted even if one fails; the
    /// first failure is returned afterwards.
    pub fn reload_all(&mut self) -> Result<bool> {
        let mut first_error: Option<Error> = None;
        let mut keep = |result: Result<bool>| match result {
            Ok(reloaded) => reloaded,
            Err(e) => {
                if first_error.is_none() {
                    first_error = Some(e);
                }
                false
            }
        };

        keep(self.scorelog.refresh());
        let score_changed = keep(self.score.refresh());
        let log_changed = keep(self.scoredatalog.refresh());
        self.plays_pending |= score_changed || log_changed;
        keep(self.song.refresh());
        keep(self.information.refresh());

        match first_error {
            Some(e) => {
                warn!("Snapshot reload incomplete: {}", e);
                Err(e)
            }
            None => Ok(score_changed),
        }
    }

    /// Whether the play tables reloaded since the last
    /// [`clear_pending`](Self::clear_pending), even in a failed cycle
    pub fn plays_pending(&self) -> bool {
        self.plays_pending
    }

    pub fn clear_pending(&mut self) {
        self.plays_pending = false;
    }

    /// Load state of each table, by table name
    pub fn states(&self) -> [(&'static str, SourceState); 5] {
        [
            ("score", self.score.state()),
            ("scorelog", self.scorelog.state()),
            ("scoredatalog", self.scoredatalog.state()),
            ("song", self.song.state()),
            ("information", self.information.state()),
        ]
    }

    /// Current best state of a chart
    pub fn latest_score(&self, sha256: &str) -> Option<&ScoreRow> {
        self.score.latest(sha256)
    }

    /// Best-score update history of a chart, oldest first
    pub fn score_logs<'a>(&'a self, sha256: &str) -> impl Iterator<Item = &'a ScoreLogRow> + 'a {
        self.scorelog.rows_for(sha256)
    }

    pub fn song(&self, sha256: &str) -> Option<&SongRow> {
        self.song.latest(sha256)
    }

    pub fn song_info(&self, sha256: &str) -> Option<&InformationRow> {
        self.information.latest(sha256)
    }

    /// Every logged play, in log order
    pub fn play_log(&self) -> &[PlayLogRow] {
        self.scoredatalog.rows()
    }
}
