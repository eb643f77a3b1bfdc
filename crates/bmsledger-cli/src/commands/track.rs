//! Main tracking mode command.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use bmsledger_core::{
    Config, PlayRecord, SessionLedger, SessionManager, format_play_console, write_report,
};
use chrono::{Local, TimeDelta};
use tracing::{debug, error, info, warn};

use super::build_reconciler;
use crate::retry::load_snapshots_with_retry;
use crate::shutdown::ShutdownSignal;

/// Report window covering the whole session plus the autoload period
pub fn report_window_hours(ledger: &SessionLedger, config: &Config) -> u32 {
    let elapsed = (Local::now() - ledger.session_start()).num_seconds().max(0);
    let session_hours = u32::try_from((elapsed + 3599) / 3600).unwrap_or(u32::MAX);
    session_hours.saturating_add(config.autoload_offset)
}

fn save(ledger: &SessionLedger, config: &Config) {
    if let Err(e) = ledger.persist(&config.history_path) {
        error!("Failed to save history: {}", e);
    }

    let summary = ledger.windowed_summary(report_window_hours(ledger, config));
    if let Err(e) = write_report(&config.report_path, &summary, ledger.target_of(&summary)) {
        error!("Failed to write report: {}", e);
    }
}

fn announce(record: &PlayRecord, sessions: &SessionManager) {
    println!("{}", format_play_console(record));
    if let Err(e) = sessions.append(record) {
        warn!("Failed to append to session log: {}", e);
    }
}

/// Run the polling loop until Ctrl-C
pub fn run(config: &Config, resume: bool) -> Result<()> {
    let shutdown = Arc::new(ShutdownSignal::new());
    let shutdown_ctrlc = Arc::clone(&shutdown);
    ctrlc::set_handler(move || {
        info!("Received shutdown signal, stopping...");
        shutdown_ctrlc.trigger();
    })
    .context("Failed to install Ctrl-C handler")?;

    info!("bmsledger {}", env!("CARGO_PKG_VERSION"));

    let mut ledger = if resume {
        SessionLedger::load_or_default(&config.history_path)
    } else {
        SessionLedger::new()
    };

    let mut sessions = SessionManager::new(&config.session_dir);
    if let Err(e) = sessions.start_session() {
        warn!("Session log disabled: {}", e);
    }

    let mut reconciler = build_reconciler(config);
    if reconciler.index().is_empty() {
        warn!(
            "No difficulty tables found in {}",
            config.table_dir().display()
        );
    }

    println!("Waiting for score databases... (Press Ctrl-C to quit)");
    if !load_snapshots_with_retry(&mut reconciler, &shutdown) {
        save(&ledger, config);
        return Ok(());
    }

    // Plays made before startup
    let cutoff = Local::now() - TimeDelta::hours(i64::from(config.autoload_offset));
    let loaded = reconciler.ingest_since(&mut ledger, cutoff.timestamp());
    for record in &loaded {
        announce(record, &sessions);
    }
    save(&ledger, config);

    println!("Ready to track. Waiting for plays...");
    let interval = Duration::from_secs(config.poll_interval_secs.max(1));
    while !shutdown.wait(interval) {
        match reconciler.poll(&mut ledger) {
            Ok(accepted) if accepted.is_empty() => {}
            Ok(accepted) => {
                debug!("{} new plays", accepted.len());
                for record in &accepted {
                    announce(record, &sessions);
                }
                save(&ledger, config);
            }
            Err(e) if e.is_not_found() => {
                warn!("Score database unavailable, skipping cycle: {}", e);
            }
            Err(e) => {
                warn!("Failed to poll score databases: {}", e);
            }
        }
    }

    save(&ledger, config);
    info!(
        "Session ended with {} plays ({} charts)",
        ledger.len(),
        ledger.merged().len()
    );
    Ok(())
}
