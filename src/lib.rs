//! Reader for CVS/RCS history reports
//!
//! Parses the text printed by `rlog`/`cvs log` and `co -p` and rebuilds the
//! revision history of each file: trunk and branch topology, tag resolution,
//! chronological links and the liveness of every revision.
//!
//! - `artifacts`: parsers, revision types and the per-file history graph
//! - `areas`: filesystem access (repository layout) and the output console
//! - `commands`: the reports printed by the `rcslog` binary
//! - `errors`: the error type shared by all of the above

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;

/// Layout of `rcslog log` output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// Header, author, date, state and full message per revision
    #[default]
    Medium,
    /// One line per revision
    Oneline,
}
