use crate::artifacts::checkout::{
    CO_FILENAME_REGEX, CO_MISSING_REVISION_REGEX, CO_REVISION_REGEX, CO_SIDE_BRANCHES_REGEX,
    CO_WARNING_REGEX,
};
use crate::artifacts::core::read_tool_line;
use crate::artifacts::revision::revision_number::RevisionNumber;
use crate::errors::{RcsError, Result};
use regex::Regex;
use std::io::BufRead;
use tracing::{debug, trace};

/// File and revision a checkout is about to print
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutHeader {
    /// RCS file path without the `,v` suffix
    pub filename: String,
    pub revision: RevisionNumber,
}

/// Parse the banner of a checkout to standard output
///
/// # Returns
///
/// `None` when the stream is empty, the header otherwise.
/// `MissingRevisionInCheckout` when the tool reports that the requested
/// revision does not exist, `MalformedOutput` for anything unexpected.
pub fn parse_checkout_header(mut reader: impl BufRead) -> Result<Option<CheckoutHeader>> {
    let Some(first) = read_tool_line(&mut reader)? else {
        return Ok(None);
    };

    let filename = Regex::new(CO_FILENAME_REGEX)?
        .captures(&first)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| RcsError::malformed_checkout("unable to find filename in co output"))?;

    let revision_re = Regex::new(CO_REVISION_REGEX)?;
    let missing_re = Regex::new(CO_MISSING_REVISION_REGEX)?;
    let side_branches_re = Regex::new(CO_SIDE_BRANCHES_REGEX)?;
    let warning_re = Regex::new(CO_WARNING_REGEX)?;

    while let Some(line) = read_tool_line(&mut reader)? {
        if let Some(caps) = revision_re.captures(&line) {
            let revision = RevisionNumber::parse_revision(&caps[1])?;
            debug!(%filename, %revision, "parsed checkout header");
            return Ok(Some(CheckoutHeader { filename, revision }));
        }
        if missing_re.is_match(&line) || side_branches_re.is_match(&line) {
            return Err(RcsError::MissingRevisionInCheckout { line });
        }
        if !warning_re.is_match(&line) {
            break;
        }
        trace!(%line, "ignoring checkout warning");
    }

    Err(RcsError::malformed_checkout(
        "unable to find revision in co output",
    ))
}
