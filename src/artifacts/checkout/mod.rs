//! Parsing of the banner `co -p` writes to its error stream
//!
//! ```text
//! /cvsroot/module/file.c,v  -->  standard output
//! revision 1.3
//! ```
//!
//! A warning about unknown admin phrases may appear between the two lines.

pub mod checkout_header;

pub const CO_FILENAME_REGEX: &str = r"^(.*),v\s+-->\s+(?:standard output|stdout)\s*$";
pub const CO_REVISION_REGEX: &str = r"^revision\s+([\d.]+)\s*$";
pub const CO_WARNING_REGEX: &str = r"^.*co: .*,v: warning: Unknown phrases like .*$";
pub const CO_MISSING_REVISION_REGEX: &str = r"^.*co: .*,v: revision.*absent$";
pub const CO_SIDE_BRANCHES_REGEX: &str = r"^.*co: .*,v: no side branches present for [\d.]+$";
