//! Revision numbers, revision records and tags

pub mod revision;
pub mod revision_number;
pub mod tag;

/// Name of the synthetic branch tag for the default branch
pub const MAIN_TAG: &str = "MAIN";
/// Name of the synthetic tag for the tip of [`MAIN_TAG`]
pub const HEAD_TAG: &str = "HEAD";
/// State recorded for revisions that delete the file
pub const DEAD_STATE: &str = "dead";
