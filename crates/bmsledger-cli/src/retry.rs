//! Waiting for the score databases to become readable.

use bmsledger_core::ScoreReconciler;
use bmsledger_core::config::polling;
use tracing::{debug, info, warn};

use crate::shutdown::ShutdownSignal;

/// Block until every snapshot database exists and loads.
///
/// The game may not have created the player databases yet, or may be
/// rewriting one, so failed attempts are retried indefinitely.
/// Returns `false` if shutdown was signaled first.
pub fn load_snapshots_with_retry(reconciler: &mut ScoreReconciler, shutdown: &ShutdownSignal) -> bool {
    let mut attempts = 0u32;
    loop {
        if shutdown.is_shutdown() {
            return false;
        }
        attempts += 1;

        let missing: Vec<String> = reconciler
            .gateway()
            .missing()
            .iter()
            .map(|path| path.display().to_string())
            .collect();

        if missing.is_empty() {
            match reconciler.reload_all() {
                Ok(_) => {
                    if attempts > 1 {
                        info!("Score databases available after {} attempts", attempts);
                    }
                    return true;
                }
                Err(e) => {
                    debug!(
                        "Failed to load score databases: {}. Retrying in {}s (attempt {})",
                        e,
                        polling::SNAPSHOT_RETRY_DELAY.as_secs(),
                        attempts
                    );
                }
            }
        } else if attempts == polling::SNAPSHOT_WARN_AFTER {
            warn!(
                "Still waiting for score databases: {} (check oraja_path and player_path)",
                missing.join(", ")
            );
        } else {
            debug!(
                "Score databases missing: {}. Retrying in {}s (attempt {})",
                missing.join(", "),
                polling::SNAPSHOT_RETRY_DELAY.as_secs(),
                attempts
            );
        }

        if shutdown.wait(polling::SNAPSHOT_RETRY_DELAY) {
            return false;
        }
    }
}
