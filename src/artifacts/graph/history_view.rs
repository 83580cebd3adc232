//! Filtered views over the history of one file
//!
//! Two synthetic tags are registered on every view:
//!
//! - `MAIN`: a branch tag on the file's default branch, or on the trunk when
//!   no default branch is set. It resolves to the tip of that branch.
//! - `HEAD`: a non-branch tag on the revision `MAIN` resolves to, i.e. what a
//!   plain checkout yields. This is unrelated to the `head:` field of the
//!   log header, which only names the highest trunk revision.
//!
//! A filter is either a revision or branch number, or the name of a tag. The
//! view then holds the tagged revision (or the whole tagged branch) and all
//! revisions it descends from.

use crate::artifacts::graph::graph_builder::RevisionGraph;
use crate::artifacts::log::log_parser::FileLog;
use crate::artifacts::revision::revision::{Revision, RevisionId, TagId};
use crate::artifacts::revision::revision_number::RevisionNumber;
use crate::artifacts::revision::tag::Tag;
use crate::artifacts::revision::{HEAD_TAG, MAIN_TAG};
use crate::errors::{RcsError, Result};
use derive_new::new;
use tracing::debug;

#[derive(Debug, Clone, Copy, new)]
pub struct HistoryView<'l> {
    log: &'l FileLog,
}

/// A built history graph and the revisions visible under a filter
#[derive(Debug, Clone)]
pub struct FileHistory {
    graph: RevisionGraph,
    visible: Vec<RevisionId>,
    view_tag: Option<Tag>,
}

impl HistoryView<'_> {
    /// Build the history graph and select the revisions shown for `filter`
    ///
    /// # Arguments
    ///
    /// * `filter` - revision number, branch number or tag name; `None` or an
    ///   empty string shows every revision
    ///
    /// # Returns
    ///
    /// The history, or `UnknownTagOrRevision` when the filter is neither a
    /// number nor a known tag name
    pub fn filter(&self, filter: Option<&str>) -> Result<FileHistory> {
        let filter = filter.map(str::trim).filter(|filter| !filter.is_empty());
        let header = &self.log.header;

        let mut tags = header
            .symbolic_names
            .iter()
            .filter(|(name, _)| name != MAIN_TAG && name != HEAD_TAG)
            .map(|(name, number)| Tag::new(Some(name.clone()), number.clone()))
            .collect::<Vec<_>>();

        let main_id = TagId(tags.len());
        tags.push(Tag::new(
            Some(MAIN_TAG.to_string()),
            header.default_branch.clone().unwrap_or_default(),
        ));

        // Numeric filters get an anonymous tag that lives only for the build.
        let anonymous_id = filter
            .and_then(|filter| RevisionNumber::parse_tag(filter).ok())
            .map(|number| {
                tags.push(Tag::new(None, number));
                TagId(tags.len() - 1)
            });

        let mut graph = RevisionGraph::build(self.log.entries.clone(), tags);
        let main_rev = graph.tag(main_id).co_rev;
        graph.add_revision_tag(HEAD_TAG, main_rev);

        let view_tag = match (filter, anonymous_id) {
            (_, Some(id)) => Some(graph.remove_tag(id)),
            (Some(name), None) => {
                let id = graph
                    .find_tag(name)
                    .ok_or_else(|| RcsError::UnknownTagOrRevision {
                        name: name.to_string(),
                    })?;
                Some(graph.tag(id).clone())
            }
            (None, None) => None,
        };

        let visible = match &view_tag {
            Some(view_tag) => {
                let branch = view_tag.view_branch();
                graph
                    .revision_ids()
                    .filter(|id| is_visible(graph.revision(*id), view_tag, &branch))
                    .collect()
            }
            None => graph.revision_ids().collect::<Vec<_>>(),
        };

        debug!(
            filename = %header.filename,
            filter = filter.unwrap_or(""),
            visible = visible.len(),
            total = graph.revisions().len(),
            "filtered file history"
        );

        Ok(FileHistory {
            graph,
            visible,
            view_tag,
        })
    }
}

/// The tagged revision, revisions on the tagged branch, and their ancestors
fn is_visible(revision: &Revision, view_tag: &Tag, branch: &RevisionNumber) -> bool {
    let number = revision.number();

    *number == view_tag.number
        || revision.branch_number == view_tag.number
        || (*number < view_tag.number && revision.branch_number.is_prefix_of(branch))
}

impl FileHistory {
    pub fn graph(&self) -> &RevisionGraph {
        &self.graph
    }

    /// Ids of the visible revisions, in ascending number order
    pub fn visible_ids(&self) -> &[RevisionId] {
        &self.visible
    }

    pub fn revisions(&self) -> impl DoubleEndedIterator<Item = &Revision> + '_ {
        self.visible.iter().map(|id| self.graph.revision(*id))
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// The tag the view was filtered by, resolved against the graph
    pub fn view_tag(&self) -> Option<&Tag> {
        self.view_tag.as_ref()
    }

    pub fn main(&self) -> Option<&Tag> {
        self.named(MAIN_TAG)
    }

    pub fn head(&self) -> Option<&Tag> {
        self.named(HEAD_TAG)
    }

    fn named(&self, name: &str) -> Option<&Tag> {
        self.graph.find_tag(name).map(|id| self.graph.tag(id))
    }

    /// Revision a tag resolves to
    pub fn resolve(&self, tag: &Tag) -> Option<&Revision> {
        tag.co_rev.map(|id| self.graph.revision(id))
    }
}
