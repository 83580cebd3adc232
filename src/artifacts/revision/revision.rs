use crate::artifacts::revision::revision_number::RevisionNumber;
use crate::errors::{RcsError, Result};
use std::fmt;

/// Position of a revision inside its [`RevisionGraph`](crate::artifacts::graph::graph_builder::RevisionGraph)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RevisionId(pub(crate) usize);

/// Position of a tag inside its [`RevisionGraph`](crate::artifacts::graph::graph_builder::RevisionGraph)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagId(pub(crate) usize);

impl RevisionId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl TagId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Line counts of the `lines: +N -M` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineChanges {
    pub added: u32,
    pub removed: u32,
}

impl LineChanges {
    pub fn try_parse(value: &str) -> Result<Self> {
        let malformed = || RcsError::malformed_log(format!("invalid lines field '{value}'"));

        let mut parts = value.split_whitespace();
        let added = parts
            .next()
            .and_then(|part| part.strip_prefix('+'))
            .and_then(|count| count.parse().ok())
            .ok_or_else(malformed)?;
        let removed = parts
            .next()
            .and_then(|part| part.strip_prefix('-'))
            .and_then(|count| count.parse().ok())
            .ok_or_else(malformed)?;

        Ok(LineChanges { added, removed })
    }
}

impl fmt::Display for LineChanges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{} -{}", self.added, self.removed)
    }
}

/// One revision record of a log report, before any linking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionEntry {
    pub number: RevisionNumber,
    /// The revision number as printed by the tool
    pub string: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub author: String,
    pub state: String,
    pub dead: bool,
    pub lines: Option<LineChanges>,
    pub commit_id: Option<String>,
    pub log: String,
}

impl RevisionEntry {
    /// First line of the log message
    pub fn short_message(&self) -> &str {
        self.log.lines().next().unwrap_or("")
    }
}

/// A revision linked into the history graph of its file
///
/// All links are ids into the same graph. `undead` is the revision itself
/// for live revisions, the nearest live ancestor for dead ones, and `None`
/// when every ancestor is dead too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision {
    pub entry: RevisionEntry,
    pub branch_number: RevisionNumber,
    pub prev: Option<RevisionId>,
    pub next: Option<RevisionId>,
    pub parent: Option<RevisionId>,
    pub undead: Option<RevisionId>,
    /// Non-branch tags on this revision
    pub tags: Vec<TagId>,
    /// Branch tags forking from this revision
    pub branch_points: Vec<TagId>,
    /// Branch tags naming the branch this revision lives on
    pub branches: Vec<TagId>,
}

impl Revision {
    pub(crate) fn unlinked(entry: RevisionEntry) -> Self {
        let branch_number = entry.number.branch_number();
        Revision {
            entry,
            branch_number,
            prev: None,
            next: None,
            parent: None,
            undead: None,
            tags: Vec::new(),
            branch_points: Vec::new(),
            branches: Vec::new(),
        }
    }

    pub fn number(&self) -> &RevisionNumber {
        &self.entry.number
    }

    pub fn string(&self) -> &str {
        &self.entry.string
    }

    pub fn is_dead(&self) -> bool {
        self.entry.dead
    }
}
