use crate::areas::console::Console;
use crate::artifacts::graph::revision_list::RevisionList;
use crate::artifacts::log::log_parser::LogParser;
use crate::artifacts::revision::revision::{LineChanges, RevisionEntry};
use crate::artifacts::revision::revision_number::RevisionNumber;
use crate::commands::porcelain::log::DATE_FORMAT;
use crate::commands::{display_name, report_file_error, report_skipped_file};
use crate::errors::RcsError;
use anyhow::Context;
use chrono::{DateTime, Utc};
use std::fmt;
use std::io::{BufRead, Write};

/// Marker for changes that created the file
pub const NEW_FILE: &str = "New";
/// Diffstat of changes that created the file
pub const NEW_DIFFSTAT: &str = "new";

#[derive(Debug, Clone, Default)]
pub struct ChangesOptions {
    /// Only list changes committed after this revision of each file
    pub since: Option<String>,
}

/// One committed revision, described relative to its predecessor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    pub filename: String,
    /// `None` when the revision created the file
    pub old: Option<RevisionNumber>,
    pub new: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
    pub lines: Option<LineChanges>,
    pub summary: String,
}

impl ChangeRecord {
    pub fn from_entry(filename: &str, entry: &RevisionEntry) -> Self {
        ChangeRecord {
            filename: filename.to_string(),
            old: entry.number.previous_revision(),
            new: entry.string.clone(),
            author: entry.author.clone(),
            timestamp: entry.timestamp,
            lines: entry.lines,
            summary: entry.short_message().to_string(),
        }
    }

    pub fn old_revision(&self) -> String {
        self.old
            .as_ref()
            .map_or_else(|| NEW_FILE.to_string(), ToString::to_string)
    }

    pub fn diffstat(&self) -> String {
        self.lines
            .map_or_else(|| NEW_DIFFSTAT.to_string(), |lines| lines.to_string())
    }
}

impl fmt::Display for ChangeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} -> {} {} {} {}",
            self.timestamp.format(DATE_FORMAT),
            self.filename,
            self.old_revision(),
            self.new,
            self.author,
            self.diffstat(),
            self.summary
        )
    }
}

impl Console {
    /// Print the changes of every file of an `rlog` report in commit order
    pub fn changes(&self, input: impl BufRead, opts: &ChangesOptions) -> anyhow::Result<()> {
        let parser = LogParser::new(input)?;
        let mut failures = 0usize;
        let mut records = Vec::new();

        for file in parser {
            let file = match file {
                Ok(file) => file,
                Err(err) if err.is_file_scoped() => {
                    report_file_error(&err);
                    failures += 1;
                    continue;
                }
                Err(err) => return Err(err).context("failed to read the log report"),
            };

            let filename = display_name(&file.header);
            match RevisionList::new(&file.entries).since(opts.since.as_deref()) {
                Ok(entries) => records.extend(
                    entries
                        .into_iter()
                        .map(|entry| ChangeRecord::from_entry(filename, entry)),
                ),
                Err(err @ RcsError::UnknownRevision { .. }) => {
                    report_skipped_file(&file.header, &err);
                }
                Err(err) => return Err(err.into()),
            }
        }

        records.sort_by(|a, b| {
            a.timestamp
                .cmp(&b.timestamp)
                .then_with(|| a.filename.cmp(&b.filename))
                .then_with(|| a.new.cmp(&b.new))
        });

        for record in &records {
            writeln!(self.writer(), "{record}")?;
        }
        self.writer().flush()?;

        if failures > 0 {
            anyhow::bail!(
                "{failures} file(s) of the report could not be read; {} change(s) listed",
                records.len()
            );
        }

        Ok(())
    }
}
