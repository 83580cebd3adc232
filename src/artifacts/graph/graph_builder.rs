//! Linking of revisions and tags into the history graph of one file
//!
//! Revisions are sorted by number, which visits every revision after its
//! predecessor on the same branch and right after the revision its branch
//! forks from. A table of the most recently visited revision per branch depth
//! is then enough to find each revision's `prev` and `parent`.
//!
//! Branch tags get their `co_rev` overwritten by every revision visited on
//! their branch, so after the walk it points at the branch tip.

use crate::artifacts::revision::revision::{Revision, RevisionEntry, RevisionId, TagId};
use crate::artifacts::revision::revision_number::RevisionNumber;
use crate::artifacts::revision::tag::Tag;
use std::collections::HashMap;
use tracing::debug;

/// Macro for linking traces that are only compiled in with the debug_graph feature
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug_graph")]
        {
            tracing::trace!($($arg)*);
        }
    };
}

type TagIndex = HashMap<RevisionNumber, Vec<TagId>>;

/// Revisions and tags of one file, linked to each other by ids
///
/// Revisions are stored in ascending number order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RevisionGraph {
    revisions: Vec<Revision>,
    tags: Vec<Tag>,
}

/// Tags of one file grouped by the numbers revisions look them up with
#[derive(Default)]
struct TagPartition {
    /// Non-branch tags by revision number
    by_revision: TagIndex,
    /// Branch tags by branch number
    by_branch: TagIndex,
    /// Branch tags by the revision their branch forks from
    by_branch_point: TagIndex,
}

impl TagPartition {
    fn new(tags: &mut [Tag]) -> Self {
        let mut partition = TagPartition::default();

        for (index, tag) in tags.iter_mut().enumerate() {
            let id = TagId(index);
            tag.co_rev = None;
            tag.branch_rev = None;

            if tag.is_branch {
                partition
                    .by_branch_point
                    .entry(tag.number.fork_point())
                    .or_default()
                    .push(id);
                partition
                    .by_branch
                    .entry(tag.number.clone())
                    .or_default()
                    .push(id);
            } else {
                partition
                    .by_revision
                    .entry(tag.number.clone())
                    .or_default()
                    .push(id);
            }
        }

        for group in partition.by_revision.values().chain(partition.by_branch.values()) {
            for &id in group {
                tags[id.0].aliases = group.iter().copied().filter(|&other| other != id).collect();
            }
        }

        partition
    }

    fn lookup(index: &TagIndex, number: &RevisionNumber) -> Vec<TagId> {
        index.get(number).cloned().unwrap_or_default()
    }
}

impl RevisionGraph {
    /// Link the revisions of one file with its tags
    ///
    /// `entries` may come in any order; their numbers must be unique.
    pub fn build(entries: Vec<RevisionEntry>, mut tags: Vec<Tag>) -> Self {
        let partition = TagPartition::new(&mut tags);

        let mut revisions = entries
            .into_iter()
            .map(Revision::unlinked)
            .collect::<Vec<_>>();
        revisions.sort_by(|a, b| a.number().cmp(b.number()));

        // Most recently visited revision per branch depth
        let mut history: Vec<Option<RevisionId>> = Vec::new();

        for index in 0..revisions.len() {
            let id = RevisionId(index);
            let number = revisions[index].number().clone();
            let depth = number.depth();

            let prev = history.get(depth).copied().flatten().filter(|prev| {
                depth == 0 || revisions[prev.0].number().truncated(1) == number.truncated(1)
            });
            if let Some(prev) = prev {
                revisions[prev.0].next = Some(id);
            }

            let parent = match depth {
                0 => None,
                _ => history
                    .get(depth - 1)
                    .copied()
                    .flatten()
                    .filter(|parent| *revisions[parent.0].number() == number.truncated(2)),
            };

            let undead = if revisions[index].is_dead() {
                prev.or(parent)
                    .and_then(|ancestor| revisions[ancestor.0].undead)
            } else {
                Some(id)
            };

            let revision_tags = TagPartition::lookup(&partition.by_revision, &number);
            let branch_points = TagPartition::lookup(&partition.by_branch_point, &number);
            let (branch_number, branches) = match prev {
                Some(prev) => (
                    revisions[prev.0].branch_number.clone(),
                    revisions[prev.0].branches.clone(),
                ),
                None => {
                    let branch_number = number.branch_number();
                    let branches = TagPartition::lookup(&partition.by_branch, &branch_number);
                    (branch_number, branches)
                }
            };

            for tag in &revision_tags {
                tags[tag.0].co_rev = Some(id);
            }
            for tag in &branch_points {
                tags[tag.0].co_rev = Some(id);
                tags[tag.0].branch_rev = Some(id);
            }
            // Later revisions on the branch overwrite this, leaving the tip.
            for tag in &branches {
                tags[tag.0].co_rev = Some(id);
            }

            debug_log!(
                revision = %number,
                prev = ?prev,
                parent = ?parent,
                undead = ?undead,
                branches = branches.len(),
                "linked revision"
            );

            let revision = &mut revisions[index];
            revision.prev = prev;
            revision.parent = parent;
            revision.undead = undead;
            revision.tags = revision_tags;
            revision.branch_points = branch_points;
            revision.branch_number = branch_number;
            revision.branches = branches;

            if history.len() <= depth {
                history.resize(depth + 1, None);
            }
            history[depth] = Some(id);
        }

        debug!(
            revisions = revisions.len(),
            tags = tags.len(),
            depth = history.len(),
            "built revision graph"
        );

        RevisionGraph { revisions, tags }
    }

    /// Revisions in ascending number order
    pub fn revisions(&self) -> &[Revision] {
        &self.revisions
    }

    pub fn revision_ids(&self) -> impl Iterator<Item = RevisionId> + '_ {
        (0..self.revisions.len()).map(RevisionId)
    }

    pub fn revision(&self, id: RevisionId) -> &Revision {
        &self.revisions[id.0]
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn tag(&self, id: TagId) -> &Tag {
        &self.tags[id.0]
    }

    pub fn is_empty(&self) -> bool {
        self.revisions.is_empty()
    }

    pub fn find_revision(&self, number: &RevisionNumber) -> Option<RevisionId> {
        self.revisions
            .binary_search_by(|revision| revision.number().cmp(number))
            .ok()
            .map(RevisionId)
    }

    /// Look up a named tag; the most recently registered one wins
    pub fn find_tag(&self, name: &str) -> Option<TagId> {
        self.tags
            .iter()
            .rposition(|tag| tag.name() == Some(name))
            .map(TagId)
    }

    /// Names of the tags in `ids`, skipping anonymous ones
    pub fn tag_names(&self, ids: &[TagId]) -> Vec<&str> {
        ids.iter().filter_map(|id| self.tag(*id).name()).collect()
    }

    /// Register a non-branch tag on an already linked revision
    ///
    /// Without a revision the tag has an empty number and resolves to nothing.
    pub(crate) fn add_revision_tag(&mut self, name: &str, co_rev: Option<RevisionId>) -> TagId {
        let id = TagId(self.tags.len());
        let number = co_rev
            .map(|rev| self.revisions[rev.0].number().clone())
            .unwrap_or_default();

        let mut tag = Tag::new(Some(name.to_string()), number);
        tag.is_branch = false;
        tag.co_rev = co_rev;

        if let Some(rev) = co_rev {
            let aliases = self.revisions[rev.0].tags.clone();
            for alias in &aliases {
                self.tags[alias.0].aliases.push(id);
            }
            tag.aliases = aliases;
            self.revisions[rev.0].tags.push(id);
        }

        self.tags.push(tag);
        id
    }

    /// Remove a tag and every reference to it, shifting the ids of later tags
    pub(crate) fn remove_tag(&mut self, id: TagId) -> Tag {
        let mut removed = self.tags.remove(id.0);
        detach_tag(&mut removed.aliases, id);

        for revision in &mut self.revisions {
            detach_tag(&mut revision.tags, id);
            detach_tag(&mut revision.branch_points, id);
            detach_tag(&mut revision.branches, id);
        }
        for tag in &mut self.tags {
            detach_tag(&mut tag.aliases, id);
        }

        removed
    }
}

fn detach_tag(ids: &mut Vec<TagId>, removed: TagId) {
    ids.retain(|&id| id != removed);
    for id in ids.iter_mut() {
        if id.0 > removed.0 {
            id.0 -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::graph::fixtures::{dead_entry, entry, tag};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn id_of(graph: &RevisionGraph, number: &str) -> RevisionId {
        graph
            .find_revision(&RevisionNumber::parse_revision(number).unwrap())
            .unwrap()
    }

    fn string_of(graph: &RevisionGraph, id: Option<RevisionId>) -> Option<&str> {
        id.map(|id| graph.revision(id).string())
    }

    #[test]
    fn links_trunk_revisions_and_branch_points() {
        let graph = RevisionGraph::build(
            vec![entry("1.3"), entry("1.1"), entry("1.2")],
            vec![tag("B", "1.2.2")],
        );

        let r1 = id_of(&graph, "1.1");
        let r2 = id_of(&graph, "1.2");
        let r3 = id_of(&graph, "1.3");

        assert_eq!(string_of(&graph, graph.revision(r2).prev), Some("1.1"));
        assert_eq!(string_of(&graph, graph.revision(r3).prev), Some("1.2"));
        assert_eq!(string_of(&graph, graph.revision(r1).next), Some("1.2"));
        assert_eq!(graph.revision(r1).prev, None);
        assert_eq!(graph.revision(r3).next, None);

        assert_eq!(graph.tag_names(&graph.revision(r2).branch_points), vec!["B"]);
        let branch = graph.tag(graph.find_tag("B").unwrap());
        assert_eq!(string_of(&graph, branch.branch_rev), Some("1.2"));
        assert_eq!(string_of(&graph, branch.co_rev), Some("1.2"));
    }

    #[test]
    fn branch_revisions_link_to_their_fork_point() {
        let graph = RevisionGraph::build(
            vec![
                entry("1.1"),
                entry("1.2"),
                entry("1.3"),
                entry("1.2.2.1"),
                entry("1.2.2.2"),
                entry("1.2.2.2.2.1"),
                entry("1.1.1.1"),
            ],
            vec![tag("B", "1.2.0.2"), tag("VENDOR", "1.1.1")],
        );

        let b1 = graph.revision(id_of(&graph, "1.2.2.1"));
        assert_eq!(b1.prev, None);
        assert_eq!(string_of(&graph, b1.parent), Some("1.2"));
        assert_eq!(b1.branch_number.to_string(), "1.2.2");
        assert_eq!(graph.tag_names(&b1.branches), vec!["B"]);

        let b2 = graph.revision(id_of(&graph, "1.2.2.2"));
        assert_eq!(string_of(&graph, b2.prev), Some("1.2.2.1"));
        assert_eq!(graph.tag_names(&b2.branches), vec!["B"]);

        let nested = graph.revision(id_of(&graph, "1.2.2.2.2.1"));
        assert_eq!(string_of(&graph, nested.parent), Some("1.2.2.2"));
        assert!(nested.branches.is_empty());

        let vendor = graph.revision(id_of(&graph, "1.1.1.1"));
        assert_eq!(string_of(&graph, vendor.parent), Some("1.1"));
        assert_eq!(vendor.prev, None);

        // 1.3 follows 1.2 on the trunk even though branch revisions sort in between.
        let r3 = graph.revision(id_of(&graph, "1.3"));
        assert_eq!(string_of(&graph, r3.prev), Some("1.2"));
        assert!(graph.revision(id_of(&graph, "1.3")).branch_number.is_empty());
    }

    #[test]
    fn branch_tags_resolve_to_the_branch_tip() {
        let graph = RevisionGraph::build(
            vec![
                entry("1.2.2.2"),
                entry("1.1"),
                entry("1.2.2.1"),
                entry("1.2"),
                entry("1.2.2.3"),
            ],
            vec![tag("B", "1.2.0.2"), tag("MAIN", "")],
        );

        let branch = graph.tag(graph.find_tag("B").unwrap());
        assert_eq!(string_of(&graph, branch.co_rev), Some("1.2.2.3"));
        assert_eq!(string_of(&graph, branch.branch_rev), Some("1.2"));

        let main = graph.tag(graph.find_tag("MAIN").unwrap());
        assert_eq!(string_of(&graph, main.co_rev), Some("1.2"));
    }

    #[test]
    fn dead_revisions_point_to_nearest_live_ancestor() {
        let graph = RevisionGraph::build(
            vec![
                entry("1.1"),
                dead_entry("1.2"),
                dead_entry("1.3"),
                dead_entry("1.1.2.1"),
            ],
            vec![],
        );

        let r1 = id_of(&graph, "1.1");
        assert_eq!(graph.revision(r1).undead, Some(r1));
        assert_eq!(graph.revision(id_of(&graph, "1.2")).undead, Some(r1));
        assert_eq!(graph.revision(id_of(&graph, "1.3")).undead, Some(r1));
        assert_eq!(graph.revision(id_of(&graph, "1.1.2.1")).undead, Some(r1));
    }

    #[test]
    fn dead_revisions_without_live_ancestor_have_no_undead() {
        let graph = RevisionGraph::build(vec![dead_entry("1.1"), dead_entry("1.2")], vec![]);

        assert_eq!(graph.revision(id_of(&graph, "1.1")).undead, None);
        assert_eq!(graph.revision(id_of(&graph, "1.2")).undead, None);
    }

    #[test]
    fn tags_sharing_a_number_are_aliases() {
        let graph = RevisionGraph::build(
            vec![entry("1.1"), entry("1.2")],
            vec![tag("A", "1.2"), tag("B", "1.2"), tag("C", "1.1")],
        );

        let a = graph.find_tag("A").unwrap();
        let b = graph.find_tag("B").unwrap();
        assert_eq!(graph.tag(a).aliases, vec![b]);
        assert_eq!(graph.tag(b).aliases, vec![a]);
        assert!(graph.tag(graph.find_tag("C").unwrap()).aliases.is_empty());
        assert_eq!(graph.tag_names(&graph.revision(id_of(&graph, "1.2")).tags), vec!["A", "B"]);
    }

    #[test]
    fn tags_on_missing_revisions_stay_unresolved() {
        let graph = RevisionGraph::build(vec![entry("1.1")], vec![tag("GONE", "1.7")]);

        assert_eq!(graph.tag(graph.find_tag("GONE").unwrap()).co_rev, None);
    }

    #[test]
    fn added_and_removed_tags_keep_references_consistent() {
        let mut graph = RevisionGraph::build(
            vec![entry("1.1"), entry("1.2")],
            vec![tag("A", "1.2"), tag("X", "1.1"), tag("B", "1.2")],
        );
        let r2 = id_of(&graph, "1.2");

        let head = graph.add_revision_tag("HEAD", Some(r2));
        assert_eq!(graph.tag_names(&graph.revision(r2).tags), vec!["A", "B", "HEAD"]);
        assert_eq!(graph.tag_names(&graph.tag(head).aliases), vec!["A", "B"]);

        let removed = graph.remove_tag(graph.find_tag("X").unwrap());
        assert_eq!(removed.name(), Some("X"));
        assert_eq!(graph.tag_names(&graph.revision(r2).tags), vec!["A", "B", "HEAD"]);
        let head = graph.find_tag("HEAD").unwrap();
        assert_eq!(graph.tag_names(&graph.tag(head).aliases), vec!["A", "B"]);
        assert!(graph.revision(id_of(&graph, "1.1")).tags.is_empty());
    }

    /// Trunk `1.1..=1.n` plus one branch `1.k.2` of `m` revisions
    fn branched_numbers() -> impl Strategy<Value = Vec<String>> {
        (1u32..8, 0u32..5).prop_flat_map(|(trunk, branch)| {
            (1..=trunk).prop_map(move |fork| {
                let mut numbers = (1..=trunk).map(|n| format!("1.{n}")).collect::<Vec<_>>();
                numbers.extend((1..=branch).map(|n| format!("1.{fork}.2.{n}")));
                numbers
            })
        })
    }

    proptest! {
        #[test]
        fn links_do_not_depend_on_report_order(
            (numbers, shuffled) in branched_numbers()
                .prop_flat_map(|numbers| (Just(numbers.clone()), Just(numbers).prop_shuffle()))
        ) {
            let sorted = RevisionGraph::build(numbers.iter().map(|n| entry(n)).collect(), vec![]);
            let shuffled = RevisionGraph::build(shuffled.iter().map(|n| entry(n)).collect(), vec![]);

            for (a, b) in sorted.revisions().iter().zip(shuffled.revisions()) {
                prop_assert_eq!(a.string(), b.string());
                prop_assert_eq!(a.prev, b.prev);
                prop_assert_eq!(a.next, b.next);
                prop_assert_eq!(a.parent, b.parent);
            }
        }

        #[test]
        fn prev_links_stay_on_one_branch(numbers in branched_numbers()) {
            let graph = RevisionGraph::build(numbers.iter().map(|n| entry(n)).collect(), vec![]);

            for revision in graph.revisions() {
                if let Some(prev) = revision.prev {
                    let prev = graph.revision(prev);
                    prop_assert_eq!(&prev.branch_number, &revision.branch_number);
                    prop_assert!(prev.number() < revision.number());
                }
                if revision.number().depth() > 0 && revision.prev.is_none() {
                    let parent = revision.parent.map(|id| graph.revision(id).string());
                    let fork = revision.number().truncated(2).to_string();
                    prop_assert_eq!(parent, Some(fork.as_str()));
                }
            }
        }
    }
}
