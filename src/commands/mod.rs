//! Command implementations
//!
//! - `plumbing`: thin views of a single artifact (checkout banner, repository listings)
//! - `porcelain`: reports built from whole `rlog` outputs (history log, change summaries)
//!
//! Every command is a method on [`Console`](crate::areas::console::Console)
//! and writes its report to the console's writer.

pub mod plumbing;
pub mod porcelain;

use crate::artifacts::log::log_parser::LogHeader;
use crate::errors::RcsError;
use colored::Colorize;

/// Report a problem with one file of a multi-file input on stderr
pub(crate) fn report_file_error(err: &RcsError) {
    eprintln!("{} {err}", "error:".red().bold());
}

/// Report a file left out of a report on stderr
pub(crate) fn report_skipped_file(header: &LogHeader, err: &RcsError) {
    eprintln!(
        "{} skipping {}: {err}",
        "warning:".yellow().bold(),
        display_name(header)
    );
}

/// Working file name when the report carries one, else the RCS path without `,v`
pub(crate) fn display_name(header: &LogHeader) -> &str {
    header.working_file.as_deref().unwrap_or_else(|| {
        header
            .filename
            .strip_suffix(",v")
            .unwrap_or(&header.filename)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("/cvs/mod/file.c,v", None, "/cvs/mod/file.c")]
    #[case("/cvs/mod/file.c,v", Some("file.c"), "file.c")]
    #[case("RCS/odd", None, "RCS/odd")]
    fn display_name_prefers_working_file(
        #[case] filename: &str,
        #[case] working_file: Option<&str>,
        #[case] expected: &str,
    ) {
        let header = LogHeader {
            filename: filename.to_string(),
            working_file: working_file.map(str::to_string),
            ..LogHeader::default()
        };

        assert_eq!(display_name(&header), expected);
    }
}
