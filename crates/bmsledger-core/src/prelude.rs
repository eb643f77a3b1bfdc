//! Prelude module for convenient imports
//!
//! ```ignore
//! use bmsledger_core::prelude::*;
//! ```

// Engine
pub use crate::catalog::DifficultyIndex;
pub use crate::reconcile::ScoreReconciler;
pub use crate::snapshot::{SnapshotGateway, SnapshotPaths};

// Error handling
pub use crate::error::{Error, Result};

// Play data
pub use crate::play::{Judge, Lamp, PlayRecord, PriorBest};

// Session
pub use crate::ledger::{SessionLedger, Summary};

// Export format trait
pub use crate::export::ExportFormat;
