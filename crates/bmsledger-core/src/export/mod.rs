//! Play log export.
//!
//! - **TSV**: one tab-separated row per play, with a header
//! - **JSON**: one object per line (NDJSON)
//! - **Session**: per-run log file that rows are appended to as plays arrive

mod console;
mod format;
mod json;
mod session;
mod tsv;

pub use console::*;
pub use format::*;
pub use json::*;
pub use session::*;
pub use tsv::*;
