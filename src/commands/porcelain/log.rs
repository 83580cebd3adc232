use crate::LogFormat;
use crate::areas::console::Console;
use crate::artifacts::graph::history_view::{FileHistory, HistoryView};
use crate::artifacts::log::log_parser::{FileLog, LogParser};
use crate::artifacts::revision::HEAD_TAG;
use crate::artifacts::revision::revision::{Revision, RevisionId};
use crate::artifacts::revision::tag::Tag;
use crate::commands::{display_name, report_file_error, report_skipped_file};
use crate::errors::RcsError;
use anyhow::Context;
use colored::Colorize;
use std::io::{BufRead, Write};

pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    /// Tag name, branch number or revision number to restrict the history to
    pub filter: Option<String>,
    pub format: LogFormat,
}

impl Console {
    /// Print the history of every file of an `rlog` report
    ///
    /// Files the report could not describe are reported on stderr and the
    /// remaining files are still printed. Fails after the whole report has
    /// been processed when any file could not be read.
    pub fn log(&self, input: impl BufRead, opts: &LogOptions) -> anyhow::Result<()> {
        let parser = LogParser::new(input)?;
        let mut failures = 0usize;
        let mut printed = 0usize;

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

            let history = match HistoryView::new(&file).filter(opts.filter.as_deref()) {
                Ok(history) => history,
                Err(err @ RcsError::UnknownTagOrRevision { .. }) => {
                    report_skipped_file(&file.header, &err);
                    continue;
                }
                Err(err) => {
                    return Err(err).with_context(|| {
                        format!("failed to build the history of {}", file.header.filename)
                    });
                }
            };

            if printed > 0 && opts.format == LogFormat::Medium {
                writeln!(self.writer())?;
            }
            self.show_history(&file, &history, opts.format)?;
            printed += 1;
        }

        self.writer().flush()?;

        if failures > 0 {
            anyhow::bail!("{failures} file(s) of the report could not be read");
        }

        Ok(())
    }

    fn show_history(
        &self,
        file: &FileLog,
        history: &FileHistory,
        format: LogFormat,
    ) -> anyhow::Result<()> {
        match format {
            LogFormat::Medium => self.show_file_header(file, history)?,
            LogFormat::Oneline => {
                writeln!(self.writer(), "{}", display_name(&file.header).bold())?;
            }
        }

        for id in history.visible_ids().iter().rev() {
            let revision = history.graph().revision(*id);
            match format {
                LogFormat::Medium => self.show_revision_medium(history, *id, revision)?,
                LogFormat::Oneline => self.show_revision_oneline(history, *id, revision)?,
            }
        }

        Ok(())
    }

    fn show_file_header(&self, file: &FileLog, history: &FileHistory) -> anyhow::Result<()> {
        writeln!(self.writer(), "RCS file: {}", file.header.filename.bold())?;
        if let Some(working_file) = &file.header.working_file {
            writeln!(self.writer(), "Working file: {working_file}")?;
        }
        if let Some(view_tag) = history.view_tag() {
            writeln!(
                self.writer(),
                "View: {}",
                self.describe_view_tag(history, view_tag)
            )?;
        }
        if !file.header.description.is_empty() {
            writeln!(self.writer(), "Description:")?;
            for line in file.header.description.lines() {
                writeln!(self.writer(), "    {line}")?;
            }
        }
        writeln!(
            self.writer(),
            "Revisions: {} of {}",
            history.len(),
            history.graph().revisions().len()
        )?;

        Ok(())
    }

    fn describe_view_tag(&self, history: &FileHistory, tag: &Tag) -> String {
        let kind = if tag.is_branch { "branch" } else { "revision" };
        let number = match tag.number.is_empty() {
            true => "trunk".to_string(),
            false => tag.number.to_string(),
        };
        let label = match tag.name() {
            Some(name) => format!("{name} ({kind} {number})"),
            None => format!("{kind} {number}"),
        };

        match history.resolve(tag) {
            Some(revision) => format!("{label} -> {}", revision.string()),
            None => label,
        }
    }

    fn show_revision_medium(
        &self,
        history: &FileHistory,
        id: RevisionId,
        revision: &Revision,
    ) -> anyhow::Result<()> {
        let entry = &revision.entry;

        writeln!(self.writer())?;
        writeln!(
            self.writer(),
            "{}{}",
            format!("revision {}", entry.string).yellow(),
            self.revision_decoration(history, id)
        )?;
        writeln!(self.writer(), "Author: {}", entry.author)?;
        writeln!(
            self.writer(),
            "Date:   {}",
            entry.timestamp.format(DATE_FORMAT)
        )?;

        let state = match entry.dead {
            true => entry.state.red().to_string(),
            false => entry.state.clone(),
        };
        let mut details = vec![format!("State:  {state}")];
        if let Some(lines) = &entry.lines {
            details.push(format!("lines: {lines}"));
        }
        if let Some(commit_id) = &entry.commit_id {
            details.push(format!("commitid: {commit_id}"));
        }
        writeln!(self.writer(), "{}", details.join("; "))?;

        if !revision.branch_points.is_empty() {
            let branches = revision
                .branch_points
                .iter()
                .map(|tag_id| history.graph().tag(*tag_id))
                .map(|tag| match tag.name() {
                    Some(name) => format!("{} ({})", name.green(), tag.number),
                    None => tag.number.to_string(),
                })
                .collect::<Vec<_>>();
            writeln!(self.writer(), "Branches: {}", branches.join(", "))?;
        }

        writeln!(self.writer())?;
        for message_line in entry.log.lines() {
            writeln!(self.writer(), "    {message_line}")?;
        }

        Ok(())
    }

    fn show_revision_oneline(
        &self,
        history: &FileHistory,
        id: RevisionId,
        revision: &Revision,
    ) -> anyhow::Result<()> {
        let entry = &revision.entry;
        let number = match entry.dead {
            true => entry.string.red(),
            false => entry.string.yellow(),
        };

        writeln!(
            self.writer(),
            "{}{} {} {}",
            number,
            self.revision_decoration(history, id),
            entry.author,
            entry.short_message()
        )?;

        Ok(())
    }

    /// ` (HEAD, branch: MAIN, tag: RELEASE_1)` for the tags resolving to `id`
    fn revision_decoration(&self, history: &FileHistory, id: RevisionId) -> String {
        let (head, names): (Vec<_>, Vec<_>) = history
            .graph()
            .tags()
            .iter()
            .filter(|tag| tag.co_rev == Some(id))
            .filter_map(|tag| tag.name().map(|name| (name, tag.is_branch)))
            .partition(|(name, _)| *name == HEAD_TAG);

        let names = head
            .into_iter()
            .map(|(name, _)| name.cyan().bold().to_string())
            .chain(names.into_iter().map(|(name, is_branch)| match is_branch {
                true => format!("branch: {}", name.green()),
                false => format!("tag: {}", name.yellow()),
            }))
            .collect::<Vec<_>>();

        if names.is_empty() {
            String::new()
        } else {
            format!(" ({})", names.join(", "))
        }
    }
}
