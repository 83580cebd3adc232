use crate::artifacts::core::read_tool_line;
use crate::artifacts::log::timestamp::parse_timestamp;
use crate::artifacts::log::{
    Boundary, CVSNT_ERROR_REGEX, ENTRY_END_MARKER, ENTRY_INFO_REGEX, HEADER_FIELDS, HeaderField,
    LOG_END_MARKER, LOG_ERROR_REGEX, REVISION_REGEX, UNKNOWN_PHRASES_WARNING,
};
use crate::artifacts::revision::DEAD_STATE;
use crate::artifacts::revision::revision::{LineChanges, RevisionEntry};
use crate::artifacts::revision::revision_number::RevisionNumber;
use crate::errors::{RcsError, Result};
use regex::Regex;
use std::io::BufRead;
use tracing::{debug, trace, warn};

/// Header block of one file log
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogHeader {
    /// Path of the RCS file, as printed after `RCS file:`
    pub filename: String,
    pub working_file: Option<String>,
    /// Highest trunk revision, as recorded in the RCS file
    pub head: Option<RevisionNumber>,
    /// Branch that checkouts default to, when set
    pub default_branch: Option<RevisionNumber>,
    /// Symbolic names in declaration order
    pub symbolic_names: Vec<(String, RevisionNumber)>,
    pub description: String,
}

/// Everything a report holds about one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLog {
    pub header: LogHeader,
    /// Entries in report order (newest first for plain `rlog`)
    pub entries: Vec<RevisionEntry>,
    /// `EndOfFile` when more files may follow, `EndOfStream` otherwise
    pub termination: Boundary,
}

struct LogPatterns {
    revision: Regex,
    entry_info: Regex,
    log_error: Regex,
    cvsnt_error: Regex,
}

impl LogPatterns {
    fn compile() -> Result<Self> {
        Ok(LogPatterns {
            revision: Regex::new(REVISION_REGEX)?,
            entry_info: Regex::new(ENTRY_INFO_REGEX)?,
            log_error: Regex::new(LOG_ERROR_REGEX)?,
            cvsnt_error: Regex::new(CVSNT_ERROR_REGEX)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    /// Between two file logs
    BetweenFiles,
    /// Somewhere inside a file log
    InsideFile,
    Exhausted,
}

/// Pull parser over a report of one or more file logs
///
/// Iterating yields one `FileLog` per file. A file whose log cannot be
/// parsed, or for which the tool reported an error, is yielded as an `Err`;
/// the next call resumes with the following file. I/O errors end the
/// iteration.
pub struct LogParser<R> {
    reader: R,
    patterns: LogPatterns,
    position: Position,
}

impl<R: BufRead> LogParser<R> {
    pub fn new(reader: R) -> Result<Self> {
        Ok(LogParser {
            reader,
            patterns: LogPatterns::compile()?,
            position: Position::BetweenFiles,
        })
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let line = read_tool_line(&mut self.reader)?;
        if line.is_none() {
            self.position = Position::Exhausted;
        }

        Ok(line)
    }

    /// Parse the header block of the next file
    ///
    /// Returns `None` when the stream holds nothing but blank lines. The
    /// boundary tells whether entries follow (`EndOfEntry`), or the file has
    /// no entries.
    pub fn read_header(&mut self) -> Result<Option<(LogHeader, Boundary)>> {
        let mut header = LogHeader::default();
        let mut seen_content = false;
        let mut parsing_tags = false;
        let mut parsing_description = false;

        let boundary = loop {
            let Some(line) = self.read_line()? else {
                break Boundary::EndOfStream;
            };
            if !line.trim().is_empty() && !seen_content {
                seen_content = true;
                self.position = Position::InsideFile;
            }

            if line == ENTRY_END_MARKER {
                break Boundary::EndOfEntry;
            }
            if line == LOG_END_MARKER {
                self.position = Position::BetweenFiles;
                break Boundary::EndOfFile;
            }

            if parsing_description {
                header.description.push_str(&line);
                header.description.push('\n');
                continue;
            }

            if parsing_tags {
                if let Some(tag_line) = line.strip_prefix('\t') {
                    header.symbolic_names.push(Self::parse_symbolic_name(tag_line)?);
                    continue;
                }
                parsing_tags = false;
            }

            if let Some((key, value)) = line.split_once(':')
                && let Some(field) = HEADER_FIELDS.get(key)
            {
                let value = value.trim();
                match field {
                    HeaderField::RcsFile => header.filename = value.to_string(),
                    HeaderField::WorkingFile => header.working_file = Some(value.to_string()),
                    HeaderField::Head if !value.is_empty() => {
                        header.head = Some(RevisionNumber::parse_revision(value)?)
                    }
                    HeaderField::Branch if !value.is_empty() => {
                        header.default_branch = Some(RevisionNumber::parse_tag(value)?)
                    }
                    HeaderField::SymbolicNames => parsing_tags = true,
                    HeaderField::Description => parsing_description = true,
                    HeaderField::Head | HeaderField::Branch => {}
                }
                continue;
            }

            self.check_tool_error(&line, &mut header)?;
        };

        if !seen_content {
            return Ok(None);
        }
        if header.filename.is_empty() {
            return Err(RcsError::malformed_log(
                "log header does not name an RCS file",
            ));
        }

        debug!(
            filename = %header.filename,
            tags = header.symbolic_names.len(),
            ?boundary,
            "parsed log header"
        );

        Ok(Some((header, boundary)))
    }

    fn parse_symbolic_name(line: &str) -> Result<(String, RevisionNumber)> {
        let (name, number) = line
            .split_once(':')
            .ok_or_else(|| RcsError::malformed_log(format!("invalid symbolic name '{line}'")))?;

        Ok((name.trim().to_string(), RevisionNumber::parse_tag(number)?))
    }

    /// Turn tool error lines into `ToolReported`
    ///
    /// The unknown-phrases warning only records the file name. Lines that
    /// are neither errors nor known fields are ignored.
    fn check_tool_error(&mut self, line: &str, header: &mut LogHeader) -> Result<()> {
        if let Some(caps) = self.patterns.cvsnt_error.captures(line) {
            let filename = caps
                .get(1)
                .or_else(|| caps.get(2))
                .or_else(|| caps.get(3))
                .map(|m| m.as_str().to_string())
                .ok_or_else(|| {
                    RcsError::malformed_log(format!("no filename in CVSNT error: {line}"))
                })?;
            let message = caps.get(4).map_or("", |m| m.as_str()).to_string();

            return Err(self.tool_error(filename, message));
        }

        if let Some(caps) = self.patterns.log_error.captures(line) {
            let filename = caps[1].to_string();
            let message = caps[2].to_string();

            if message.starts_with(UNKNOWN_PHRASES_WARNING) {
                trace!(%filename, %message, "ignoring rlog warning");
                header.filename = filename;
                return Ok(());
            }

            return Err(self.tool_error(filename, message));
        }

        Ok(())
    }

    fn tool_error(&mut self, filename: String, message: String) -> RcsError {
        warn!(%filename, %message, "log tool reported an error");
        // The tool prints nothing else for a file it failed on.
        if self.position != Position::Exhausted {
            self.position = Position::BetweenFiles;
        }

        RcsError::ToolReported { filename, message }
    }

    /// Parse the next entry of the current file
    ///
    /// Returns `None` instead of an entry when the file or the stream ended
    /// before another `revision` line.
    pub fn read_entry(&mut self) -> Result<(Option<RevisionEntry>, Boundary)> {
        let Some(line) = self.read_line()? else {
            return Ok((None, Boundary::EndOfStream));
        };
        // Some RCS versions print an entry separator right before the file separator.
        if line == LOG_END_MARKER {
            self.position = Position::BetweenFiles;
            return Ok((None, Boundary::EndOfFile));
        }

        let revision = self
            .patterns
            .revision
            .captures(&line)
            .map(|caps| caps[1].to_string());
        let info = match revision {
            Some(_) => self.read_line()?,
            None => None,
        };

        let (log, boundary) = match info.as_deref() {
            Some(ENTRY_END_MARKER) => (String::new(), Boundary::EndOfEntry),
            Some(LOG_END_MARKER) => {
                self.position = Position::BetweenFiles;
                (String::new(), Boundary::EndOfFile)
            }
            None if revision.is_some() => (String::new(), Boundary::EndOfStream),
            _ => self.read_log_message()?,
        };

        let Some(revision) = revision else {
            return Err(RcsError::malformed_log(format!(
                "expected a revision line, found '{line}'"
            )));
        };
        let info = info.ok_or_else(|| {
            RcsError::malformed_log(format!("revision {revision} has no date line"))
        })?;

        let entry = self.parse_entry(&revision, &info, log)?;
        trace!(revision = %entry.string, ?boundary, "parsed log entry");

        Ok((Some(entry), boundary))
    }

    fn read_log_message(&mut self) -> Result<(String, Boundary)> {
        let mut log = String::new();

        let boundary = loop {
            let Some(line) = self.read_line()? else {
                break Boundary::EndOfStream;
            };
            if line.starts_with("branches:") {
                continue;
            }
            if line == ENTRY_END_MARKER {
                break Boundary::EndOfEntry;
            }
            if line == LOG_END_MARKER {
                self.position = Position::BetweenFiles;
                break Boundary::EndOfFile;
            }

            log.push_str(&line);
            log.push('\n');
        };

        Ok((log, boundary))
    }

    fn parse_entry(&self, revision: &str, info: &str, log: String) -> Result<RevisionEntry> {
        let caps = self.patterns.entry_info.captures(info).ok_or_else(|| {
            RcsError::malformed_log(format!("invalid date line for revision {revision}: '{info}'"))
        })?;

        let state = caps["state"].trim().to_string();
        let lines = caps
            .name("lines")
            .map(|m| LineChanges::try_parse(m.as_str().trim()))
            .transpose()?;

        Ok(RevisionEntry {
            number: RevisionNumber::parse_revision(revision)?,
            string: revision.to_string(),
            timestamp: parse_timestamp(caps["date"].trim())?,
            author: caps["author"].trim().to_string(),
            dead: state == DEAD_STATE,
            state,
            lines,
            commit_id: caps.name("commitid").map(|m| m.as_str().to_string()),
            log,
        })
    }

    /// Skip the remainder of the current file log
    pub fn skip_file(&mut self) -> Result<()> {
        while let Some(line) = self.read_line()? {
            if line == LOG_END_MARKER {
                self.position = Position::BetweenFiles;
                break;
            }
        }

        Ok(())
    }

    /// Parse the complete log of the next file
    pub fn read_file(&mut self) -> Result<Option<FileLog>> {
        let Some((header, mut boundary)) = self.read_header()? else {
            return Ok(None);
        };

        let mut entries = Vec::new();
        while boundary == Boundary::EndOfEntry {
            let (entry, next) = self.read_entry()?;
            entries.extend(entry);
            boundary = next;
        }

        debug!(
            filename = %header.filename,
            entries = entries.len(),
            ?boundary,
            "parsed file log"
        );

        Ok(Some(FileLog {
            header,
            entries,
            termination: boundary,
        }))
    }
}

impl<R: BufRead> Iterator for LogParser<R> {
    type Item = Result<FileLog>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.position {
            Position::Exhausted => return None,
            Position::InsideFile => {
                debug!("resynchronizing at the next file separator");
                if let Err(err) = self.skip_file() {
                    self.position = Position::Exhausted;
                    return Some(Err(err));
                }
                if self.position == Position::Exhausted {
                    return None;
                }
            }
            Position::BetweenFiles => {}
        }

        match self.read_file() {
            Ok(Some(file)) => Some(Ok(file)),
            Ok(None) => None,
            Err(err) => {
                if matches!(err, RcsError::Io(_)) {
                    self.position = Position::Exhausted;
                }
                Some(Err(err))
            }
        }
    }
}
