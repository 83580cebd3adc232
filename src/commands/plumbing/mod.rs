//! Single-artifact commands
//!
//! - `co_header`: parse the banner of `co -p`
//! - `listing`: list a repository directory or all of its RCS files

pub mod co_header;
pub mod listing;
