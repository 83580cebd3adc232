//! Parsing of `rlog` / `cvs log` reports
//!
//! A report holds the logs of one or more RCS files:
//!
//! ```text
//! RCS file: /cvsroot/module/file.c,v
//! head: 1.3
//! branch:
//! symbolic names:
//!         RELEASE_1: 1.2
//!         STABLE: 1.2.0.2
//! description:
//! ----------------------------
//! revision 1.3
//! date: 2010/01/24 14:20:12;  author: joe;  state: Exp;  lines: +2 -1
//! log message
//! ----------------------------
//! revision 1.2
//! ...
//! =============================================================================
//! ```
//!
//! - `log_parser`: header and entry parsing over a line stream
//! - `timestamp`: the date formats written by the different tool versions

pub mod log_parser;
pub mod timestamp;

/// Separates the entries of one file (28 dashes)
pub const ENTRY_END_MARKER: &str = "----------------------------";
/// Terminates the log of one file (77 equals signs)
pub const LOG_END_MARKER: &str =
    "=============================================================================";

pub const REVISION_REGEX: &str = r"^revision\s+([0-9.]+)";
pub const ENTRY_INFO_REGEX: &str = r"^date:\s+(?P<date>[^;]+);\s+author:\s+(?P<author>[^;]+);\s+state:\s+(?P<state>[^;]+);(?:\s+lines:\s+(?P<lines>[0-9\s+-]+);?)?(?:\s+commitid:\s+(?P<commitid>[a-zA-Z0-9]+);?)?\s*$";
/// `rlog: path,v[:line]: message`; some builds omit the `rlog: ` prefix
pub const LOG_ERROR_REGEX: &str = r"^(?:rlog: )*(.*,v)(?::\d+)?: (.*)$";
/// CVSNT flavours of the same errors, with an optionally quoted path
pub const CVSNT_ERROR_REGEX: &str = r"^(?:cvs rcsfile: |cvs \[rcsfile aborted\]: )(?:`(.*,v)' |cannot open (.*,v): |(.*,v): |)(.*)$";
/// Emitted for RCS files with unknown admin fields; harmless
pub const UNKNOWN_PHRASES_WARNING: &str = "warning: Unknown phrases like ";

/// Header fields of a file log, keyed by the text before the first colon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderField {
    RcsFile,
    WorkingFile,
    Head,
    Branch,
    SymbolicNames,
    Description,
}

pub const HEADER_FIELDS: phf::Map<&'static str, HeaderField> = phf::phf_map! {
    "RCS file" => HeaderField::RcsFile,
    "Working file" => HeaderField::WorkingFile,
    "head" => HeaderField::Head,
    "branch" => HeaderField::Branch,
    "symbolic names" => HeaderField::SymbolicNames,
    "description" => HeaderField::Description,
};

/// Where a header or entry read stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// An entry separator: another entry of the same file follows
    EndOfEntry,
    /// The file separator: the report may continue with another file
    EndOfFile,
    /// The stream itself ended
    EndOfStream,
}
