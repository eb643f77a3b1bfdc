//! One-shot report command.

use anyhow::{Result, bail};
use bmsledger_core::ledger::format_playtime;
use bmsledger_core::{Config, SessionLedger, write_report};
use chrono::{Local, TimeDelta};

use super::build_reconciler;

/// Load the last `hours` of plays and write the overlay report
pub fn run(config: &Config, hours: Option<u32>) -> Result<()> {
    let hours = hours.unwrap_or(config.autoload_offset);
    let mut reconciler = build_reconciler(config);

    let missing = reconciler.gateway().missing();
    if !missing.is_empty() {
        let list: Vec<String> = missing.iter().map(|p| p.display().to_string()).collect();
        bail!("Score databases not found: {}", list.join(", "));
    }
    reconciler.reload_all()?;

    let now = Local::now();
    let cutoff = now - TimeDelta::hours(i64::from(hours));
    let mut ledger = SessionLedger::starting_at(cutoff);
    reconciler.ingest_since(&mut ledger, cutoff.timestamp());

    let summary = ledger.windowed_summary_at(now, hours);
    write_report(&config.report_path, &summary, ledger.target_of(&summary))?;

    eprintln!(
        "{} plays, {} notes, {:.2}% total, playtime {}",
        summary.playcount,
        summary.notes,
        summary.total_score_rate,
        format_playtime(summary.playtime)
    );
    eprintln!("Report written to: {}", config.report_path.display());
    Ok(())
}
