//! History graph of a single file
//!
//! - `graph_builder`: links revisions and tags by number
//! - `history_view`: synthetic `MAIN`/`HEAD` tags and filtering by tag, branch or revision
//! - `revision_list`: chronological queries over a file's revisions

pub mod graph_builder;
pub mod history_view;
pub mod revision_list;
