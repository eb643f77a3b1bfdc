//! Session play history.
//!
//! The ledger keeps every accepted play in time order plus a per-chart
//! "best of session" view, and produces the windowed summary and report
//! for streaming overlays.
//!
//! ## Persistence
//!
//! Only the ordered history is written to disk. On restore the per-chart
//! view is rebuilt by replaying every record through [`SessionLedger::add`].

mod persist;
mod report;
mod session;
mod summary;

pub use persist::*;
pub use report::*;
pub use session::*;
pub use summary::*;
