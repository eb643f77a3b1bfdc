use std::time::Duration;

use chrono::{DateTime, Local, NaiveDate, TimeDelta};

use super::session::SessionLedger;
use crate::play::{Judge, PlayRecord};

/// Aggregate of the plays inside a report window
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Date the session started
    pub date: NaiveDate,
    /// Judged notes (PG through PR) across the window
    pub notes: u64,
    pub total_score_rate: f64,
    pub playcount: usize,
    /// Total chart length of the window's plays
    pub playtime: Duration,
    /// Notes per hour of playtime, 0 without playtime
    pub pace: u64,
    /// Index of the window's first record in the ledger history
    pub first_index: usize,
}

impl Summary {
    /// Aggregate `target`, the tail of a history starting at `first_index`
    pub fn of(target: &[PlayRecord], date: NaiveDate, first_index: usize) -> Self {
        let judge = target
            .iter()
            .fold(Judge::default(), |acc, r| acc + *r.judge());

        let pg = u64::from(judge.pgreat);
        let gr = u64::from(judge.great);
        let notes = u64::from(judge.judged_notes());
        let total_score_rate = if notes > 0 {
            100.0 * (2 * pg + gr) as f64 / (2 * notes) as f64
        } else {
            0.0
        };

        let playtime: Duration = target
            .iter()
            .filter_map(|r| r.length_secs().filter(|len| *len > 0.0))
            .map(Duration::from_secs_f64)
            .sum();
        let playtime_secs = playtime.as_secs();
        let pace = if playtime_secs > 0 {
            3600 * notes / playtime_secs
        } else {
            0
        };

        Self {
            date,
            notes,
            total_score_rate,
            playcount: target.len(),
            playtime,
            pace,
            first_index,
        }
    }
}

impl SessionLedger {
    /// Index of the first record at or after `cutoff` (epoch seconds).
    ///
    /// Scans forward from the oldest record; history is time ordered, so
    /// everything from here on is inside the window.
    fn window_start(&self, cutoff: i64) -> usize {
        self.history()
            .iter()
            .position(|r| r.timestamp() >= cutoff)
            .unwrap_or(self.history().len())
    }

    /// Plays from `offset_hours` before `now` onward
    pub fn window_at(&self, now: DateTime<Local>, offset_hours: u32) -> &[PlayRecord] {
        let cutoff = now - TimeDelta::hours(i64::from(offset_hours));
        &self.history()[self.window_start(cutoff.timestamp())..]
    }

    pub fn windowed_summary_at(&self, now: DateTime<Local>, offset_hours: u32) -> Summary {
        let cutoff = now - TimeDelta::hours(i64::from(offset_hours));
        let first = self.window_start(cutoff.timestamp());
        Summary::of(
            &self.history()[first..],
            self.session_start().date_naive(),
            first,
        )
    }

    pub fn windowed_summary(&self, offset_hours: u32) -> Summary {
        self.windowed_summary_at(Local::now(), offset_hours)
    }

    /// Records covered by `summary`
    pub fn target_of(&self, summary: &Summary) -> &[PlayRecord] {
        let first = summary.first_index.min(self.history().len());
        &self.history()[first..]
    }
}
