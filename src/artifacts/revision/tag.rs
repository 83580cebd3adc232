use crate::artifacts::revision::revision::{RevisionId, TagId};
use crate::artifacts::revision::revision_number::RevisionNumber;
use crate::errors::Result;

/// A symbolic name bound to a revision or a branch
///
/// Tags without a name are only created to filter a history by a raw
/// revision or branch number. The resolution fields are filled in by the
/// graph builder and refer to revisions and tags of the same file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: Option<String>,
    pub number: RevisionNumber,
    pub is_branch: bool,
    /// Revision a checkout of this tag would yield
    pub co_rev: Option<RevisionId>,
    /// Revision a branch tag forks from
    pub branch_rev: Option<RevisionId>,
    /// Other tags bound to the same number
    pub aliases: Vec<TagId>,
}

impl Tag {
    pub fn new(name: Option<String>, number: RevisionNumber) -> Self {
        let is_branch = number.is_branch();
        Tag {
            name,
            number,
            is_branch,
            co_rev: None,
            branch_rev: None,
            aliases: Vec::new(),
        }
    }

    /// Build a tag from an entry of the symbolic names table
    pub fn try_parse(name: Option<&str>, number: &str) -> Result<Self> {
        Ok(Self::new(
            name.map(str::to_string),
            RevisionNumber::parse_tag(number)?,
        ))
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The branch whose revisions (and their ancestors) a view of this tag shows
    pub fn view_branch(&self) -> RevisionNumber {
        if self.is_branch {
            self.number.clone()
        } else if self.number.len() > 2 {
            self.number.truncated(1)
        } else {
            RevisionNumber::trunk()
        }
    }
}
