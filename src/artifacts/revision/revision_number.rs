//! RCS revision and branch numbers
//!
//! A revision number is a dot-separated list of integers with an even number
//! of components (`1.4`, `1.2.2.7`). Dropping the last component of a
//! revision number yields its branch number (`1.2.2`), which has an odd number
//! of components. The trunk is the branch with the empty number.
//!
//! ## Ordering
//!
//! Numbers compare lexicographically, component by component, so a branch
//! revision sorts right after its fork point: `1.2 < 1.2.2.1 < 1.2.2.2 < 1.3`.

use crate::errors::{RcsError, Result};
use std::fmt;
use std::str::FromStr;

/// A revision number (even length), a branch number (odd length) or the trunk
/// (empty).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct RevisionNumber(Vec<u32>);

impl RevisionNumber {
    /// The number of the trunk branch
    pub fn trunk() -> Self {
        RevisionNumber(Vec::new())
    }

    /// Parse a revision number such as `1.2.2.4`
    ///
    /// # Arguments
    ///
    /// * `value` - dotted decimal string with an even number of components
    ///
    /// # Returns
    ///
    /// The parsed number, or `MalformedRevisionNumber` for empty or
    /// non-numeric components and for branch-shaped (odd length) input
    pub fn parse_revision(value: &str) -> Result<Self> {
        let components = Self::components(value)?;
        if components.is_empty() || components.len() % 2 != 0 {
            return Err(RcsError::MalformedRevisionNumber {
                value: value.to_string(),
                reason: format!(
                    "expected an even number of components, got {}",
                    components.len()
                ),
            });
        }

        Ok(RevisionNumber(components))
    }

    /// Parse a number as it appears in the symbolic names table
    ///
    /// Accepts revision numbers and branch numbers. An empty string or a
    /// single component both denote the trunk, and the magic zero that RCS
    /// stores in branch numbers (`1.2.0.4` for branch `1.2.4`) is removed.
    pub fn parse_tag(value: &str) -> Result<Self> {
        if value.trim().is_empty() {
            return Ok(Self::trunk());
        }

        let mut components = Self::components(value)?;
        let len = components.len();
        if len == 1 {
            return Ok(Self::trunk());
        }
        if len > 2 && components[len - 2] == 0 && len % 2 == 0 {
            components.remove(len - 2);
        }

        Ok(RevisionNumber(components))
    }

    fn components(value: &str) -> Result<Vec<u32>> {
        value
            .trim()
            .split('.')
            .map(|component| {
                let malformed = |reason: String| RcsError::MalformedRevisionNumber {
                    value: value.to_string(),
                    reason: format!("component '{component}': {reason}"),
                };
                // u32::from_str also takes a leading '+'.
                if !component.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(malformed("not a decimal number".to_string()));
                }
                component.parse::<u32>().map_err(|e| malformed(e.to_string()))
            })
            .collect()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Branch numbers have an odd number of components; the trunk is a branch too.
    pub fn is_branch(&self) -> bool {
        self.0.is_empty() || self.0.len() % 2 == 1
    }

    /// Branch nesting level of a revision number: 0 on the trunk, 1 on a
    /// branch of the trunk and so on.
    pub fn depth(&self) -> usize {
        (self.0.len() / 2).saturating_sub(1)
    }

    /// The branch a revision lives on (`1.2.2.4` -> `1.2.2`, `1.7` -> trunk)
    pub fn branch_number(&self) -> RevisionNumber {
        if self.depth() == 0 {
            Self::trunk()
        } else {
            self.truncated(1)
        }
    }

    /// The revision a branch or branch revision forks from
    ///
    /// For a branch number `1.2.2` this is `1.2`, for a branch revision
    /// `1.2.2.4` it is also `1.2`. Trunk numbers have no fork point and
    /// yield the trunk.
    pub fn fork_point(&self) -> RevisionNumber {
        if self.is_branch() {
            self.truncated(1)
        } else {
            self.truncated(2)
        }
    }

    /// Drop the last `count` components
    pub fn truncated(&self, count: usize) -> RevisionNumber {
        let len = self.0.len().saturating_sub(count);
        RevisionNumber(self.0[..len].to_vec())
    }

    /// Whether `self` is a leading part of `other`
    pub fn is_prefix_of(&self, other: &RevisionNumber) -> bool {
        other.0.starts_with(&self.0)
    }

    /// The revision a change to this revision was made against
    ///
    /// Decrements the last component. When that reaches zero the revision
    /// was the first on its branch and the predecessor is the fork point.
    /// Returns `None` for the first trunk revision: the file did not exist
    /// before it.
    pub fn previous_revision(&self) -> Option<RevisionNumber> {
        let (last, rest) = self.0.split_last()?;

        let previous = if *last > 1 {
            let mut components = rest.to_vec();
            components.push(last - 1);
            components
        } else {
            self.truncated(2).0
        };

        if previous.is_empty() {
            None
        } else {
            Some(RevisionNumber(previous))
        }
    }
}

impl From<Vec<u32>> for RevisionNumber {
    fn from(components: Vec<u32>) -> Self {
        RevisionNumber(components)
    }
}

impl FromStr for RevisionNumber {
    type Err = RcsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_revision(s)
    }
}

impl fmt::Display for RevisionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut components = self.0.iter();
        if let Some(first) = components.next() {
            write!(f, "{first}")?;
        }
        for component in components {
            write!(f, ".{component}")?;
        }

        Ok(())
    }
}
