//! CLI command implementations.

pub mod export;
pub mod lookup;
pub mod report;
pub mod tables;
pub mod track;

use bmsledger_core::{Config, DifficultyIndex, ScoreReconciler, SnapshotGateway};

/// Difficulty index over the install's tables, honoring the exclusion list
pub fn load_index(config: &Config) -> DifficultyIndex {
    DifficultyIndex::from_dir(config.table_dir(), &config.difftable_nglist)
}

pub fn build_reconciler(config: &Config) -> ScoreReconciler {
    ScoreReconciler::new(SnapshotGateway::from_config(config), load_index(config))
}
