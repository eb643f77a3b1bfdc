//! # bmsledger-core
//!
//! Core library for the bmsledger session tracker.
//!
//! This crate provides:
//! - Difficulty table parsing and the hash → folder index
//! - Read-only snapshots of the game's score databases
//! - Reconciliation of logged plays into scored records
//! - The session ledger with its windowed summary, overlay report and
//!   persisted history
//! - Play log export (TSV, NDJSON, per-session files)

pub mod catalog;
pub mod config;
pub mod error;
pub mod export;
pub mod ledger;
pub mod play;
pub mod prelude;
pub mod reconcile;
pub mod snapshot;

pub use catalog::{CatalogTable, DifficultyIndex, load_catalogs};
pub use config::Config;
pub use error::{Error, Result};
pub use export::{ExportFormat, JsonExporter, SessionManager, TsvExporter, format_play_console};
pub use ledger::{SessionLedger, Summary, render, write_report};
pub use play::{Judge, Lamp, PlayRecord, PriorBest};
pub use reconcile::ScoreReconciler;
pub use snapshot::{SnapshotGateway, SnapshotPaths};
