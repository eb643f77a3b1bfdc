use serde_json::{Value as JsonValue, json};

use crate::play::PlayRecord;

use super::format::ExportFormat;

/// JSON exporter (one object per line, NDJSON format)
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl ExportFormat for JsonExporter {
    fn header(&self) -> Option<String> {
        None
    }

    fn format_row(&self, record: &PlayRecord) -> String {
        format_json_entry(record).to_string()
    }

    fn extension(&self) -> &'static str {
        "jsonl"
    }
}

/// One play as a flat JSON object; deltas are `null` on a first attempt
pub fn format_json_entry(record: &PlayRecord) -> JsonValue {
    let judge = record.judge();
    let prior = record.prior();

    json!({
        "timestamp": record.played_at().to_rfc3339(),
        "sha256": record.sha256(),
        "title": record.title(),
        "difficulties": record.difficulties(),
        "lamp": record.lamp().expand_name(),
        "lamp_ordinal": record.lamp().ordinal(),
        "score": record.score(),
        "score_rate": record.score_rate(),
        "bp": record.bp(),
        "notes": record.notes(),
        "judge": {
            "pgreat": judge.pgreat,
            "great": judge.great,
            "good": judge.good,
            "bad": judge.bad,
            "poor": judge.poor,
            "miss": judge.miss
        },
        "pre_score": prior.has_score().then_some(prior.score),
        "pre_bp": prior.has_bp().then_some(prior.bp),
        "pre_lamp": prior.lamp.ordinal(),
        "diff_score": record.score_delta(),
        "diff_bp": record.bp_delta(),
        "length": record.length_secs(),
        "density": record.density()
    })
}
