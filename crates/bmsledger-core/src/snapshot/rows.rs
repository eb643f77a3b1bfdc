use rusqlite::Row;

use crate::play::BP_SENTINEL;

/// Typed row of one snapshot table.
///
/// Only the declared columns are selected, so a schema change shows up
/// as a load error instead of silently missing fields.
pub trait SnapshotRow: Sized {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    /// Chart hash the row belongs to
    fn sha256(&self) -> &str;

    fn select_sql() -> String {
        format!(
            "SELECT {} FROM {} ORDER BY rowid",
            Self::COLUMNS.join(", "),
            Self::TABLE
        )
    }
}

/// Read a non-negative counter column; NULL and negatives read as 0
fn count(row: &Row<'_>, column: &str) -> rusqlite::Result<u32> {
    let value: Option<i64> = row.get(column)?;
    Ok(value
        .map(|v| u32::try_from(v.max(0)).unwrap_or(u32::MAX))
        .unwrap_or(0))
}

/// Read a minimum BP column; NULL means no BP was recorded
fn min_bp(row: &Row<'_>, column: &str) -> rusqlite::Result<u32> {
    let value: Option<i64> = row.get(column)?;
    Ok(value.map_or(BP_SENTINEL, |v| {
        u32::try_from(v.max(0)).unwrap_or(u32::MAX)
    }))
}

fn text(row: &Row<'_>, column: &str) -> rusqlite::Result<String> {
    let value: Option<String> = row.get(column)?;
    Ok(value.unwrap_or_default())
}

/// Early/late split judgment counters shared by `score` and `scoredatalog`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimingCounts {
    pub early: [u32; 6],
    pub late: [u32; 6],
}

impl TimingCounts {
    const EARLY: [&'static str; 6] = ["epg", "egr", "egd", "ebd", "epr", "ems"];
    const LATE: [&'static str; 6] = ["lpg", "lgr", "lgd", "lbd", "lpr", "lms"];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let mut counts = Self::default();
        for i in 0..6 {
            counts.early[i] = count(row, Self::EARLY[i])?;
            counts.late[i] = count(row, Self::LATE[i])?;
        }
        Ok(counts)
    }
}

/// Current best state of a chart (`score` table)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreRow {
    pub sha256: String,
    pub mode: i64,
    pub clear: i64,
    pub notes: u32,
    pub minbp: u32,
    pub playcount: u32,
    pub timing: TimingCounts,
    pub date: i64,
}

impl SnapshotRow for ScoreRow {
    const TABLE: &'static str = "score";
    const COLUMNS: &'static [&'static str] = &[
        "sha256",
        "mode",
        "clear",
        "epg",
        "lpg",
        "egr",
        "lgr",
        "egd",
        "lgd",
        "ebd",
        "lbd",
        "epr",
        "lpr",
        "ems",
        "lms",
        "notes",
        "minbp",
        "playcount",
        "date",
    ];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            sha256: text(row, "sha256")?,
            mode: row.get::<_, Option<i64>>("mode")?.unwrap_or(0),
            clear: row.get::<_, Option<i64>>("clear")?.unwrap_or(0),
            notes: count(row, "notes")?,
            minbp: count(row, "minbp")?,
            playcount: count(row, "playcount")?,
            timing: TimingCounts::from_row(row)?,
            date: row.get::<_, Option<i64>>("date")?.unwrap_or(0),
        })
    }

    fn sha256(&self) -> &str {
        &self.sha256
    }
}

/// One entry of the best-score update history (`scorelog` table)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreLogRow {
    pub sha256: String,
    pub clear: i64,
    pub oldclear: i64,
    pub score: u32,
    pub oldscore: u32,
    pub minbp: u32,
    pub oldminbp: u32,
    pub date: i64,
}

impl SnapshotRow for ScoreLogRow {
    const TABLE: &'static str = "scorelog";
    const COLUMNS: &'static [&'static str] = &[
        "sha256", "clear", "oldclear", "score", "oldscore", "minbp", "oldminbp", "date",
    ];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            sha256: text(row, "sha256")?,
            clear: row.get::<_, Option<i64>>("clear")?.unwrap_or(0),
            oldclear: row.get::<_, Option<i64>>("oldclear")?.unwrap_or(0),
            score: count(row, "score")?,
            oldscore: count(row, "oldscore")?,
            minbp: count(row, "minbp")?,
            oldminbp: min_bp(row, "oldminbp")?,
            date: row.get::<_, Option<i64>>("date")?.unwrap_or(0),
        })
    }

    fn sha256(&self) -> &str {
        &self.sha256
    }
}

/// One finished play (`scoredatalog` table)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayLogRow {
    pub sha256: String,
    pub clear: i64,
    pub timing: TimingCounts,
    pub notes: u32,
    /// Total plays of the chart including this one
    pub playcount: u32,
    pub date: i64,
}

impl SnapshotRow for PlayLogRow {
    const TABLE: &'static str = "scoredatalog";
    const COLUMNS: &'static [&'static str] = &[
        "sha256",
        "clear",
        "epg",
        "lpg",
        "egr",
        "lgr",
        "egd",
        "lgd",
        "ebd",
        "lbd",
        "epr",
        "lpr",
        "ems",
        "lms",
        "notes",
        "playcount",
        "date",
    ];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            sha256: text(row, "sha256")?,
            clear: row.get::<_, Option<i64>>("clear")?.unwrap_or(0),
            timing: TimingCounts::from_row(row)?,
            notes: count(row, "notes")?,
            playcount: count(row, "playcount")?,
            date: row.get::<_, Option<i64>>("date")?.unwrap_or(0),
        })
    }

    fn sha256(&self) -> &str {
        &self.sha256
    }
}

/// Chart metadata (`song` table of `songdata.db`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SongRow {
    pub sha256: String,
    pub md5: String,
    pub title: String,
    /// Chart length in milliseconds
    pub length_ms: Option<i64>,
    pub notes: Option<u32>,
}

impl SnapshotRow for SongRow {
    const TABLE: &'static str = "song";
    const COLUMNS: &'static [&'static str] = &["sha256", "md5", "title", "length", "notes"];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            sha256: text(row, "sha256")?,
            md5: text(row, "md5")?,
            title: text(row, "title")?,
            length_ms: row.get("length")?,
            notes: row
                .get::<_, Option<i64>>("notes")?
                .and_then(|n| u32::try_from(n).ok()),
        })
    }

    fn sha256(&self) -> &str {
        &self.sha256
    }
}

impl SongRow {
    pub fn length_secs(&self) -> Option<f64> {
        self.length_ms.map(|ms| ms as f64 / 1000.0)
    }
}

/// Chart statistics (`information` table of `songinfo.db`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InformationRow {
    pub sha256: String,
    pub normal_notes: u32,
    pub long_notes: u32,
    pub total: f64,
    pub density: f64,
    pub main_bpm: f64,
}

impl SnapshotRow for InformationRow {
    const TABLE: &'static str = "information";
    const COLUMNS: &'static [&'static str] = &["sha256", "n", "ln", "total", "density", "mainbpm"];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            sha256: text(row, "sha256")?,
            normal_notes: count(row, "n")?,
            long_notes: count(row, "ln")?,
            total: row.get::<_, Option<f64>>("total")?.unwrap_or(0.0),
            density: row.get::<_, Option<f64>>("density")?.unwrap_or(0.0),
            main_bpm: row.get::<_, Option<f64>>("mainbpm")?.unwrap_or(0.0),
        })
    }

    fn sha256(&self) -> &str {
        &self.sha256
    }
}
