//! Read-only access to the game's score databases.
//!
//! The game keeps its state in five SQLite tables spread over two
//! directories. They are owned and rewritten by the game, so every table
//! is reloaded whole, and only when its file's modification time moves:
//!
//! - `score` (player dir): current best per chart
//! - `scorelog` (player dir): history of best-score updates
//! - `scoredatalog` (player dir): one row per finished play
//! - `song` (install dir `songdata.db`): chart metadata
//! - `information` (install dir `songinfo.db`): chart statistics

mod gateway;
mod rows;
mod source;

pub use gateway::*;
pub use rows::*;
pub use source::*;

#[cfg(test)]
pub(crate) mod fixtures;
