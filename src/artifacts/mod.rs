//! RCS data structures and algorithms
//!
//! - `checkout`: the banner printed by `co -p`
//! - `core`: shared utilities (line decoding, pager wrapper)
//! - `graph`: per-file revision graph, filtered views and chronological queries
//! - `log`: `rlog` report parsing
//! - `revision`: revision numbers, revisions and tags

pub mod checkout;
pub mod core;
pub mod graph;
pub mod log;
pub mod revision;
