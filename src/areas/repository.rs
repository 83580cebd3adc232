use crate::errors::{RcsError, Result};
use chrono::{DateTime, Utc};
use std::ffi::OsStr;
use std::fs::{self, Metadata};
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, warn};
use walkdir::WalkDir;

const RCS_SUFFIX: &str = ",v";
/// Holds the RCS files of removed files
const ATTIC_DIR: &str = "Attic";
/// Per-directory attributes kept by CVS; not part of the tree
const CVS_DIR: &str = "CVS";
/// Administrative files of the repository
const CVSROOT_DIR: &str = "CVSROOT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
}

/// One item of a repository directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// File name without the `,v` suffix, or directory name
    pub name: String,
    /// `None` for items that are neither a regular file nor a directory
    pub kind: Option<EntryKind>,
    /// Problems found while checking the item, empty when it is readable
    pub errors: Vec<String>,
    /// Removed file whose RCS file lives in the `Attic` directory
    pub in_attic: bool,
}

/// A CVS repository on the local filesystem
///
/// Paths handed to and returned by the repository are relative to its root
/// and name files the way CVS does: without the `,v` suffix and without the
/// `Attic` component of removed files.
#[derive(Debug, Clone)]
pub struct RcsRepository {
    root: Box<Path>,
}

impl RcsRepository {
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(RcsError::ItemNotFound {
                path: root.to_path_buf(),
            });
        }

        Ok(RcsRepository {
            root: fs::canonicalize(root)?.into_boxed_path(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether `path` is a directory or a (possibly removed) RCS file
    pub fn item_kind(&self, path: &Path) -> Result<EntryKind> {
        if self.root.join(path).is_dir() {
            return Ok(EntryKind::Dir);
        }

        self.rcs_file(path).map(|_| EntryKind::File)
    }

    /// List the RCS files and subdirectories of a repository directory
    ///
    /// Removed files are listed from the `Attic` with `in_attic` set. The
    /// `Attic` and `CVS` directories themselves are not listed. Entries are
    /// sorted by name.
    pub fn list_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let full_path = self.root.join(path);
        let (kind, errors) = check_path(&full_path);
        match kind {
            Some(EntryKind::Dir) if errors.is_empty() => {}
            Some(EntryKind::Dir) => {
                return Err(RcsError::UnreadableItem {
                    path: path.to_path_buf(),
                    errors,
                });
            }
            _ => {
                return Err(RcsError::ItemNotFound {
                    path: path.to_path_buf(),
                });
            }
        }

        let mut entries = Self::read_entries(&full_path, false)?;
        let attic = full_path.join(ATTIC_DIR);
        if attic.is_dir() {
            entries.extend(Self::read_entries(&attic, true)?);
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name).then(a.in_attic.cmp(&b.in_attic)));

        debug!(path = %path.display(), entries = entries.len(), "listed directory");

        Ok(entries)
    }

    fn read_entries(dir: &Path, in_attic: bool) -> Result<Vec<DirEntry>> {
        let mut entries = Vec::new();

        for item in fs::read_dir(dir)? {
            let item = item?;
            let file_name = item.file_name().to_string_lossy().into_owned();
            let (kind, errors) = check_path(&item.path());

            let name = match kind {
                Some(EntryKind::File) => match file_name.strip_suffix(RCS_SUFFIX) {
                    Some(name) => name.to_string(),
                    None => continue,
                },
                Some(EntryKind::Dir) if in_attic => continue,
                Some(EntryKind::Dir) if file_name == ATTIC_DIR || file_name == CVS_DIR => continue,
                _ => file_name,
            };

            entries.push(DirEntry {
                name,
                kind,
                errors,
                in_attic,
            });
        }

        Ok(entries)
    }

    /// All RCS files below the root, sorted, excluding `CVSROOT`
    pub fn files(&self) -> Result<Vec<PathBuf>> {
        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_skipped_dir(entry));

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|err| RcsError::UnreadableItem {
                path: err.path().map(Path::to_path_buf).unwrap_or_default(),
                errors: vec![err.to_string()],
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            if let Some(path) = to_working_path(relative) {
                files.push(path);
            }
        }

        files.sort();
        files.dedup();
        debug!(root = %self.root.display(), files = files.len(), "listed repository files");

        Ok(files)
    }

    /// Full path of the RCS file holding `path`, looking in the `Attic` too
    pub fn rcs_file(&self, path: &Path) -> Result<PathBuf> {
        let not_found = || RcsError::ItemNotFound {
            path: path.to_path_buf(),
        };
        let file_name = path.file_name().ok_or_else(not_found)?;

        let mut rcs_name = file_name.to_os_string();
        rcs_name.push(RCS_SUFFIX);

        let live = self.root.join(path).with_file_name(&rcs_name);
        if live.is_file() {
            return Ok(live);
        }

        let parent = self.root.join(path.parent().unwrap_or(Path::new("")));
        let removed = parent.join(ATTIC_DIR).join(&rcs_name);
        if removed.is_file() {
            return Ok(removed);
        }

        Err(not_found())
    }

    /// Last modification time of the RCS file holding `path`
    pub fn modified_at(&self, path: &Path) -> Result<DateTime<Utc>> {
        let rcs_file = self.rcs_file(path)?;
        let modified = fs::metadata(&rcs_file)?.modified()?;

        Ok(DateTime::<Utc>::from(modified))
    }

    /// The most recently modified readable RCS file of a directory
    ///
    /// Removed files are not considered. Returns the name without `,v`.
    pub fn newest_file(&self, path: &Path) -> Result<Option<String>> {
        let mut newest: Option<(SystemTime, String)> = None;

        for item in fs::read_dir(self.root.join(path))? {
            let item = item?;
            let file_name = item.file_name().to_string_lossy().into_owned();
            let Some(name) = file_name.strip_suffix(RCS_SUFFIX) else {
                continue;
            };

            let metadata = match fs::metadata(item.path()) {
                Ok(metadata) if metadata.is_file() => metadata,
                Ok(_) => continue,
                Err(err) => {
                    warn!(path = %item.path().display(), %err, "cannot stat RCS file");
                    continue;
                }
            };
            let modified = metadata.modified()?;

            let is_newer = newest.as_ref().is_none_or(|(time, _)| modified > *time);
            if is_newer && check_path(&item.path()).1.is_empty() {
                newest = Some((modified, name.to_string()));
            }
        }

        Ok(newest.map(|(_, name)| name))
    }
}

fn is_skipped_dir(entry: &walkdir::DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }

    let name = entry.file_name();
    let in_attic = entry
        .path()
        .parent()
        .and_then(Path::file_name)
        .is_some_and(|parent| parent == ATTIC_DIR);

    name == CVSROOT_DIR || name == CVS_DIR || in_attic
}

/// `module/Attic/file.c,v` -> `module/file.c`
fn to_working_path(relative: &Path) -> Option<PathBuf> {
    let file_name = relative.file_name()?.to_str()?;
    let name = file_name.strip_suffix(RCS_SUFFIX)?;

    let mut path = relative
        .parent()?
        .components()
        .filter(|component| *component != Component::Normal(OsStr::new(ATTIC_DIR)))
        .collect::<PathBuf>();
    path.push(name);

    Some(path)
}

/// Kind of a filesystem item and the reasons it cannot be read, if any
fn check_path(path: &Path) -> (Option<EntryKind>, Vec<String>) {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(err) => return (None, vec![format!("stat error: {err}")]),
    };

    let kind = entry_kind(&metadata);
    let readable = match kind {
        Some(EntryKind::Dir) => fs::read_dir(path).map(|_| ()),
        Some(EntryKind::File) => fs::File::open(path).map(|_| ()),
        None => return (None, vec!["error: path is not a file or directory".to_string()]),
    };

    let errors = match readable {
        Ok(()) => Vec::new(),
        Err(err) => vec![format!("error: path is not accessible: {err}")],
    };

    (kind, errors)
}

fn entry_kind(metadata: &Metadata) -> Option<EntryKind> {
    if metadata.is_dir() {
        Some(EntryKind::Dir)
    } else if metadata.is_file() {
        Some(EntryKind::File)
    } else {
        None
    }
}
