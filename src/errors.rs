//! Error taxonomy shared by the parsers, the graph and the repository layer

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading RCS tool output or resolving revisions.
///
/// Parsing errors are scoped to a single file of a multi-file report: after
/// one of them the log parser can resynchronize at the next file separator.
/// See [`RcsError::is_file_scoped`].
#[derive(Debug, Error)]
pub enum RcsError {
    /// A dotted revision or branch number could not be parsed.
    #[error("malformed revision number '{value}': {reason}")]
    MalformedRevisionNumber { value: String, reason: String },

    /// The log report does not follow the expected layout.
    #[error("malformed log output: {reason}")]
    MalformedLogOutput { reason: String },

    /// The log tool reported an error for one file of the report.
    #[error("{filename}: {message}")]
    ToolReported { filename: String, message: String },

    /// The checkout tool could not find the requested revision.
    #[error("missing revision in checkout output: {line}")]
    MissingRevisionInCheckout { line: String },

    /// The checkout banner does not follow the expected layout.
    #[error("malformed checkout output: {reason}")]
    MalformedOutput { reason: String },

    #[error("invalid tag or revision number \"{name}\"")]
    UnknownTagOrRevision { name: String },

    #[error("invalid date '{value}': {reason}")]
    InvalidDate { value: String, reason: String },

    /// A directory entry exists but cannot be read.
    #[error("unreadable item {path:?}: {}", errors.join("; "))]
    UnreadableItem { path: PathBuf, errors: Vec<String> },

    #[error("no RCS file found for {path:?}")]
    ItemNotFound { path: PathBuf },

    #[error("unknown revision {revision}")]
    UnknownRevision { revision: String },

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl RcsError {
    pub(crate) fn malformed_log(reason: impl Into<String>) -> Self {
        RcsError::MalformedLogOutput {
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed_checkout(reason: impl Into<String>) -> Self {
        RcsError::MalformedOutput {
            reason: reason.into(),
        }
    }

    /// Whether the error only concerns the file being parsed, leaving the
    /// rest of a multi-file report readable.
    pub fn is_file_scoped(&self) -> bool {
        matches!(
            self,
            RcsError::ToolReported { .. }
                | RcsError::MalformedLogOutput { .. }
                | RcsError::MalformedRevisionNumber { .. }
                | RcsError::InvalidDate { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, RcsError>;
