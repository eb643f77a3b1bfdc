use crate::play::PlayRecord;

/// One-line summary of a play for the terminal
pub fn format_play_console(record: &PlayRecord) -> String {
    let mut line = String::new();
    if !record.difficulties().is_empty() {
        line.push_str(&format!("[{}] ", record.difficulties().join(",")));
    }
    line.push_str(&format!(
        "{} | {} | {} ({:.2}%) | BP {}",
        record.title(),
        record.lamp().short_name(),
        record.score(),
        record.score_rate(),
        record.bp()
    ));

    let prior = record.prior();
    if prior.lamp < record.lamp() {
        line.push_str(&format!(" | {} -> {}", prior.lamp.short_name(), record.lamp().short_name()));
    }
    if let Some(delta) = record.score_delta() {
        line.push_str(&format!(" | score {:+}", delta));
    }
    if let Some(delta) = record.bp_delta() {
        line.push_str(&format!(" | bp {:+}", delta));
    }
    line
}
