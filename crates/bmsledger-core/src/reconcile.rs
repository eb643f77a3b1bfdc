//! Turns logged plays into classified [`PlayRecord`]s.
//!
//! The reconciler joins a `scoredatalog` row with the other snapshot
//! tables by chart hash, derives the scoring metrics, tags the chart with
//! its difficulty folders and hands the result to a [`SessionLedger`].

use tracing::{debug, info, warn};

use crate::catalog::DifficultyIndex;
use crate::error::{Error, Result};
use crate::ledger::SessionLedger;
use crate::play::{Judge, Lamp, PlayRecord, PriorBest};
use crate::snapshot::{PlayLogRow, SnapshotGateway};

pub struct ScoreReconciler {
    gateway: SnapshotGateway,
    index: DifficultyIndex,
    /// Date of the newest play handed to the ledger
    watermark: Option<i64>,
}

impl ScoreReconciler {
    pub fn new(gateway: SnapshotGateway, index: DifficultyIndex) -> Self {
        Self {
            gateway,
            index,
            watermark: None,
        }
    }

    pub fn gateway(&self) -> &SnapshotGateway {
        &self.gateway
    }

    pub fn index(&self) -> &DifficultyIndex {
        &self.index
    }

    pub fn index_mut(&mut self) -> &mut DifficultyIndex {
        &mut self.index
    }

    pub fn watermark(&self) -> Option<i64> {
        self.watermark
    }

    /// Reload changed snapshot tables. Returns whether `score` reloaded.
    pub fn reload_all(&mut self) -> Result<bool> {
        self.gateway.reload_all()
    }

    /// Build the record of one logged play.
    ///
    /// Fails with [`Error::RowResolution`] when the chart has no song
    /// metadata; such rows must be skipped.
    pub fn parse(&self, row: &PlayLogRow) -> Result<PlayRecord> {
        let sha256 = row.sha256.as_str();
        let song = self.gateway.song(sha256).ok_or_else(|| Error::RowResolution {
            sha256: sha256.to_string(),
        })?;

        let notes = self
            .gateway
            .latest_score(sha256)
            .map(|score| score.notes)
            .or(song.notes)
            .unwrap_or(row.notes);

        let judge = Judge::from_timing(row.timing.early, row.timing.late);
        let difficulties = self.index.lookup_any([sha256, song.md5.as_str()]);

        let mut record = PlayRecord::new(
            song.title.as_str(),
            sha256,
            judge,
            notes,
            Lamp::from_clear(row.clear),
            song.length_secs(),
            row.date,
        )
        .with_difficulties(difficulties);

        if row.playcount > 1 {
            record = record.with_prior(self.prior_best(sha256));
        }

        debug!(
            "Parsed play: {} [{}] score={} bp={} lamp={}",
            record.title(),
            record.difficulties().join(","),
            record.score(),
            record.bp(),
            record.lamp()
        );
        Ok(record)
    }

    /// Best results logged before the current one
    fn prior_best(&self, sha256: &str) -> PriorBest {
        let mut logs = self.gateway.score_logs(sha256).peekable();
        if logs.peek().is_none() {
            return PriorBest::default();
        }

        let mut prior = PriorBest {
            score: 0,
            bp: u32::MAX,
            lamp: Lamp::NoPlay,
        };
        for log in logs {
            prior.score = prior.score.max(log.oldscore);
            prior.bp = prior.bp.min(log.oldminbp);
            prior.lamp = prior.lamp.max(Lamp::from_clear(log.oldclear));
        }
        prior
    }

    fn ingest(&mut self, row: &PlayLogRow, ledger: &mut SessionLedger) -> Option<PlayRecord> {
        self.watermark = Some(self.watermark.map_or(row.date, |w| w.max(row.date)));
        match self.parse(row) {
            Ok(record) => ledger.add(record.clone()).then_some(record),
            Err(e) => {
                warn!("Skipping play at {}: {}", row.date, e);
                None
            }
        }
    }

    /// Add the newest logged play to `ledger`. Returns it if it was new.
    pub fn ingest_latest(&mut self, ledger: &mut SessionLedger) -> Option<PlayRecord> {
        let row = self.gateway.play_log().last()?.clone();
        self.ingest(&row, ledger)
    }

    /// Add every play logged after `cutoff` (epoch seconds), in log order.
    ///
    /// Returns the records the ledger accepted.
    pub fn ingest_since(&mut self, ledger: &mut SessionLedger, cutoff: i64) -> Vec<PlayRecord> {
        let rows: Vec<PlayLogRow> = self
            .gateway
            .play_log()
            .iter()
            .filter(|row| row.date > cutoff)
            .cloned()
            .collect();

        self.watermark = Some(self.watermark.map_or(cutoff, |w| w.max(cutoff)));
        let accepted: Vec<PlayRecord> = rows
            .iter()
            .filter_map(|row| self.ingest(row, ledger))
            .collect();

        if !accepted.is_empty() {
            info!("Loaded {} plays logged since {}", accepted.len(), cutoff);
        }
        accepted
    }

    /// One polling step: reload changed tables and ingest plays newer
    /// than anything seen so far.
    ///
    /// Without a watermark (no earlier ingestion) only the newest play is
    /// taken. Returns an error when snapshots are unavailable; the caller
    /// skips this cycle. Play tables reloaded during a failed cycle are
    /// still ingested on the next successful one.
    pub fn poll(&mut self, ledger: &mut SessionLedger) -> Result<Vec<PlayRecord>> {
        self.reload_all()?;
        if !self.gateway.plays_pending() {
            return Ok(Vec::new());
        }

        let accepted = match self.watermark {
            Some(watermark) => self.ingest_since(ledger, watermark),
            None => self.ingest_latest(ledger).into_iter().collect(),
        };
        self.gateway.clear_pending();
        Ok(accepted)
    }
}
