//! Difficulty tables.
//!
//! Difficulty tables (`*.bmt`) are gzip-compressed JSON documents maintained
//! outside the game. Each one groups charts, keyed by content hash, into
//! named difficulty folders such as `★12` or `sl5`.
//!
//! - **Parser**: decodes one table document into a [`CatalogTable`]
//! - **Index**: aggregates all tables into a hash → folder lookup

mod index;
mod parser;

pub use index::*;
pub use parser::*;
