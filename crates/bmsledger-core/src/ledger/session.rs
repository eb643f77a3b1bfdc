use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Local};
use tracing::debug;

use crate::play::PlayRecord;

/// Combine two plays of the same chart into the session best.
///
/// Lamp and BP improve independently; score, rate and judgments are
/// taken together from whichever play scored higher.
pub fn merge(pre: &PlayRecord, new: &PlayRecord) -> PlayRecord {
    debug_assert_eq!(pre.sha256, new.sha256);

    let mut merged = pre.clone();
    merged.lamp = pre.lamp.max(new.lamp);
    merged.bp = pre.bp.min(new.bp);
    if new.score > pre.score {
        merged.score = new.score;
        merged.score_rate = new.score_rate;
        merged.judge = new.judge;
    }
    merged
}

/// Play history of one session
#[derive(Debug, Clone)]
pub struct SessionLedger {
    history: Vec<PlayRecord>,
    merged: Vec<PlayRecord>,
    merged_index: HashMap<String, usize>,
    session_start: DateTime<Local>,
    playtime: Duration,
}

impl SessionLedger {
    pub fn new() -> Self {
        Self::starting_at(Local::now())
    }

    pub fn starting_at(session_start: DateTime<Local>) -> Self {
        Self {
            history: Vec::new(),
            merged: Vec::new(),
            merged_index: HashMap::new(),
            session_start,
            playtime: Duration::ZERO,
        }
    }

    /// Record a play.
    ///
    /// A play already in the history (see [`PlayRecord::is_same_play`]) is
    /// ignored. Returns whether the record was accepted.
    pub fn add(&mut self, record: PlayRecord) -> bool {
        if self.history.iter().any(|r| r.is_same_play(&record)) {
            debug!(
                "Ignoring duplicate play: {} at {}",
                record.title, record.timestamp
            );
            return false;
        }

        if let Some(length) = record.length_secs.filter(|len| *len > 0.0) {
            self.playtime += Duration::from_secs_f64(length);
        }

        match self.merged_index.get(&record.sha256).copied() {
            Some(i) => {
                self.merged[i] = merge(&self.merged[i], &record);
            }
            None => {
                self.merged_index
                    .insert(record.sha256.clone(), self.merged.len());
                self.merged.push(record.clone());
            }
        }

        // Keep time order even if an older play arrives late
        let position = self
            .history
            .partition_point(|r| r.timestamp <= record.timestamp);
        self.history.insert(position, record);
        true
    }

    /// Every accepted play, oldest first
    pub fn history(&self) -> &[PlayRecord] {
        &self.history
    }

    /// Session best per chart, in order of first appearance
    pub fn merged(&self) -> &[PlayRecord] {
        &self.merged
    }

    pub fn merged_for(&self, sha256: &str) -> Option<&PlayRecord> {
        self.merged_index.get(sha256).map(|&i| &self.merged[i])
    }

    pub fn session_start(&self) -> DateTime<Local> {
        self.session_start
    }

    /// Total chart length of all accepted plays
    pub fn playtime(&self) -> Duration {
        self.playtime
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

impl Default for SessionLedger {
    fn default() -> Self {
        Self::new()
    }
}
