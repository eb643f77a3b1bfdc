use crate::play::PlayRecord;

use super::format::ExportFormat;

const COLUMNS: [&str; 19] = [
    "date",
    "title",
    "lv",
    "lamp",
    "score",
    "score_rate",
    "bp",
    "notes",
    "pgreat",
    "great",
    "good",
    "bad",
    "poor",
    "miss",
    "pre_score",
    "diff_score",
    "pre_bp",
    "diff_bp",
    "sha256",
];

/// Tab-separated play log
#[derive(Debug, Clone, Copy, Default)]
pub struct TsvExporter;

impl ExportFormat for TsvExporter {
    fn header(&self) -> Option<String> {
        Some(COLUMNS.join("\t"))
    }

    fn format_row(&self, record: &PlayRecord) -> String {
        format_tsv_row(record)
    }

    fn extension(&self) -> &'static str {
        "tsv"
    }
}

/// Tabs and line breaks in free text would split the row
fn clean(text: &str) -> String {
    text.replace(['\t', '\r', '\n'], " ")
}

pub fn format_tsv_row(record: &PlayRecord) -> String {
    let judge = record.judge();
    let prior = record.prior();
    let optional = |delta: Option<i64>| delta.map(|d| format!("{:+}", d)).unwrap_or_default();

    let values: Vec<String> = vec![
        record.played_at().to_rfc3339(),
        clean(record.title()),
        clean(&record.difficulties().join(",")),
        record.lamp().short_name().to_string(),
        record.score().to_string(),
        format!("{:.2}", record.score_rate()),
        record.bp().to_string(),
        record.notes().to_string(),
        judge.pgreat.to_string(),
        judge.great.to_string(),
        judge.good.to_string(),
        judge.bad.to_string(),
        judge.poor.to_string(),
        judge.miss.to_string(),
        if prior.has_score() {
            prior.score.to_string()
        } else {
            "-".to_string()
        },
        optional(record.score_delta()),
        if prior.has_bp() {
            prior.bp.to_string()
        } else {
            "-".to_string()
        },
        optional(record.bp_delta()),
        record.sha256().to_string(),
    ];

    values.join("\t")
}
