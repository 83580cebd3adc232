use crate::artifacts::revision::revision::RevisionEntry;
use crate::errors::{RcsError, Result};
use derive_new::new;

/// Chronological queries over the revisions of one file
///
/// Works on raw entries in report order, independent of the graph: only
/// commit times matter here, not topology.
#[derive(Debug, Clone, Copy, new)]
pub struct RevisionList<'e> {
    entries: &'e [RevisionEntry],
}

impl<'e> RevisionList<'e> {
    pub fn all(&self) -> &'e [RevisionEntry] {
        self.entries
    }

    /// The revision with the latest commit time; the first one reported wins ties
    pub fn newest(&self) -> Option<&'e RevisionEntry> {
        self.entries.iter().reduce(|newest, entry| {
            if entry.timestamp > newest.timestamp {
                entry
            } else {
                newest
            }
        })
    }

    /// Revisions committed strictly after `revision`, or all of them
    ///
    /// # Arguments
    ///
    /// * `revision` - revision string as printed in the log, e.g. `1.2`
    ///
    /// # Returns
    ///
    /// The matching entries in report order, or `UnknownRevision` when the
    /// file has no such revision
    pub fn since(&self, revision: Option<&str>) -> Result<Vec<&'e RevisionEntry>> {
        let Some(revision) = revision else {
            return Ok(self.entries.iter().collect());
        };

        let base = self
            .entries
            .iter()
            .find(|entry| entry.string == revision)
            .ok_or_else(|| RcsError::UnknownRevision {
                revision: revision.to_string(),
            })?;

        Ok(self
            .entries
            .iter()
            .filter(|entry| entry.timestamp > base.timestamp)
            .collect())
    }
}
