use std::cmp::Ordering;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::play::{Judge, Lamp};

/// Prior-best bad play count meaning "no earlier attempt".
///
/// Score logs store unset minimum BP as a huge value, so anything at or
/// above this is treated the same way.
pub const BP_SENTINEL: u32 = 999_999;

/// Plays of the same chart with identical results this close together are the same play
pub const DUPLICATE_WINDOW_SECS: i64 = 10;

/// Best result recorded before a play, taken from the score log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorBest {
    pub score: u32,
    pub bp: u32,
    pub lamp: Lamp,
}

impl Default for PriorBest {
    fn default() -> Self {
        Self {
            score: 0,
            bp: BP_SENTINEL,
            lamp: Lamp::NoPlay,
        }
    }
}

impl PriorBest {
    pub fn has_score(&self) -> bool {
        self.score > 0
    }

    pub fn has_bp(&self) -> bool {
        self.bp < BP_SENTINEL
    }
}

/// One completed play with its derived scoring metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayRecord {
    pub(crate) title: String,
    pub(crate) sha256: String,
    pub(crate) difficulties: Vec<String>,
    pub(crate) lamp: Lamp,
    pub(crate) score: u32,
    pub(crate) score_rate: f64,
    pub(crate) bp: u32,
    pub(crate) judge: Judge,
    pub(crate) notes: u32,
    pub(crate) length_secs: Option<f64>,
    pub(crate) density: Option<f64>,
    pub(crate) timestamp: i64,
    pub(crate) prior: PriorBest,
}

impl PlayRecord {
    /// Build a record from raw judgments, deriving score, BP, rate and density
    pub fn new(
        title: impl Into<String>,
        sha256: impl Into<String>,
        judge: Judge,
        notes: u32,
        lamp: Lamp,
        length_secs: Option<f64>,
        timestamp: i64,
    ) -> Self {
        let score = judge.ex_score();
        let density = match length_secs {
            Some(len) if len > 0.0 => Some(f64::from(notes) / len),
            _ => None,
        };

        Self {
            title: title.into(),
            sha256: sha256.into(),
            difficulties: Vec::new(),
            lamp,
            score,
            score_rate: score_rate(score, notes),
            bp: judge.bad_play_count(notes),
            judge,
            notes,
            length_secs,
            density,
            timestamp,
            prior: PriorBest::default(),
        }
    }

    /// Attach difficulty folders, sorted and deduplicated
    pub fn with_difficulties<I, S>(mut self, difficulties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list: Vec<String> = difficulties.into_iter().map(Into::into).collect();
        list.sort();
        list.dedup();
        self.difficulties = list;
        self
    }

    pub fn with_prior(mut self, prior: PriorBest) -> Self {
        self.prior = prior;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn sha256(&self) -> &str {
        &self.sha256
    }

    pub fn difficulties(&self) -> &[String] {
        &self.difficulties
    }

    pub fn lamp(&self) -> Lamp {
        self.lamp
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn score_rate(&self) -> f64 {
        self.score_rate
    }

    pub fn bp(&self) -> u32 {
        self.bp
    }

    pub fn judge(&self) -> &Judge {
        &self.judge
    }

    pub fn notes(&self) -> u32 {
        self.notes
    }

    pub fn length_secs(&self) -> Option<f64> {
        self.length_secs
    }

    pub fn density(&self) -> Option<f64> {
        self.density
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn prior(&self) -> &PriorBest {
        &self.prior
    }

    pub fn played_at(&self) -> DateTime<Local> {
        DateTime::from_timestamp(self.timestamp, 0)
            .unwrap_or_default()
            .with_timezone(&Local)
    }

    /// Score change against the prior best, `None` on a first attempt
    pub fn score_delta(&self) -> Option<i64> {
        self.prior
            .has_score()
            .then(|| i64::from(self.score) - i64::from(self.prior.score))
    }

    /// BP change against the prior best, `None` on a first attempt
    pub fn bp_delta(&self) -> Option<i64> {
        self.prior
            .has_bp()
            .then(|| i64::from(self.bp) - i64::from(self.prior.bp))
    }

    /// Check whether `other` is the same play ingested twice.
    ///
    /// Not business equality: two genuine plays with identical results
    /// more than [`DUPLICATE_WINDOW_SECS`] apart are distinct.
    pub fn is_same_play(&self, other: &PlayRecord) -> bool {
        self.title == other.title
            && self.sha256 == other.sha256
            && self.score == other.score
            && self.bp == other.bp
            && self.lamp == other.lamp
            && (self.timestamp - other.timestamp).abs() <= DUPLICATE_WINDOW_SECS
    }

    pub fn cmp_by_time(&self, other: &PlayRecord) -> Ordering {
        self.timestamp.cmp(&other.timestamp)
    }
}

/// EX score as a percentage of the maximum, 0 for charts without notes
pub fn score_rate(score: u32, notes: u32) -> f64 {
    if notes == 0 {
        return 0.0;
    }
    let rate = f64::from(score) / (f64::from(notes) * 2.0) * 100.0;
    rate.clamp(0.0, 100.0)
}
