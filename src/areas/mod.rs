//! Filesystem side of the tool
//!
//! - `repository`: CVS repository layout (directory listing, `Attic`, RCS file lookup)
//! - `console`: output sink the commands write to

pub mod console;
pub mod repository;
