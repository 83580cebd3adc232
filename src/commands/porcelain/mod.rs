//! Reports over whole `rlog` outputs
//!
//! - `log`: per-file history, optionally restricted to a tag, branch or revision
//! - `changes`: every commit of the report in commit order, relative to its predecessor

pub mod changes;
pub mod log;
