use crate::areas::console::Console;
use crate::areas::repository::{DirEntry, EntryKind, RcsRepository};
use anyhow::Context;
use colored::Colorize;
use std::io::Write;
use std::path::Path;

impl Console {
    /// List one directory of a repository
    ///
    /// Subdirectories show their most recently modified RCS file, removed
    /// files are flagged, and unreadable items carry their errors.
    pub fn ls(&self, repository: &RcsRepository, path: &Path) -> anyhow::Result<()> {
        let entries = repository
            .list_dir(path)
            .with_context(|| format!("failed to list {}", path.display()))?;

        for entry in &entries {
            self.show_dir_entry(repository, path, entry)?;
        }

        Ok(())
    }

    fn show_dir_entry(
        &self,
        repository: &RcsRepository,
        path: &Path,
        entry: &DirEntry,
    ) -> anyhow::Result<()> {
        let line = match entry.kind {
            Some(EntryKind::Dir) => {
                let newest = match entry.errors.is_empty() {
                    true => repository.newest_file(&path.join(&entry.name))?,
                    false => None,
                };
                match newest {
                    Some(newest) => format!("dir  {}/ (newest: {newest})", entry.name.blue().bold()),
                    None => format!("dir  {}/", entry.name.blue().bold()),
                }
            }
            Some(EntryKind::File) if entry.in_attic => {
                format!("file {} {}", entry.name, "(Attic)".dimmed())
            }
            Some(EntryKind::File) => format!("file {}", entry.name),
            None => format!("?    {}", entry.name),
        };
        writeln!(self.writer(), "{line}")?;

        for error in &entry.errors {
            writeln!(self.writer(), "     {}", error.red())?;
        }

        Ok(())
    }

    /// List every RCS file of a repository, optionally with its modification time
    pub fn files(&self, repository: &RcsRepository, long: bool) -> anyhow::Result<()> {
        let files = repository.files().with_context(|| {
            format!("failed to list files of {}", repository.root().display())
        })?;

        for file in &files {
            if long {
                let modified = repository.modified_at(file)?;
                writeln!(
                    self.writer(),
                    "{} {}",
                    modified.format("%Y-%m-%d %H:%M:%S"),
                    file.display()
                )?;
            } else {
                writeln!(self.writer(), "{}", file.display())?;
            }
        }

        Ok(())
    }
}
