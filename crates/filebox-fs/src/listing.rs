//! Directory listing primitive
//!
//! A single non-recursive listing that the browse and search operations are
//! built on. Entries are returned in filesystem enumeration order; callers
//! sort when they need determinism.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::{Error, Result};

/// Whether an entry is a regular file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One immediate child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedEntry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
    /// Length in bytes; zero for directories.
    pub size: u64,
    /// The entry itself is a symlink (its kind describes the target).
    pub is_symlink: bool,
}

/// List the immediate children of `dir`.
///
/// Symlinks are classified by what they point to. Dangling links, special
/// files and entries whose metadata cannot be read are skipped with a
/// warning. Failing to open `dir` itself is an error; the returned
/// [`Error::Io`] keeps the original error kind so callers can tell
/// `PermissionDenied` apart.
pub fn list_dir(dir: &Path) -> Result<Vec<ListedEntry>> {
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;

    let mut result = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "skipping unreadable dir entry");
                continue;
            }
        };

        let path = entry.path();
        let is_symlink = entry
            .file_type()
            .map(|t| t.is_symlink())
            .unwrap_or(false);

        // fs::metadata follows symlinks
        let meta = match fs::metadata(&path) {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping entry without metadata");
                continue;
            }
        };

        let kind = if meta.is_dir() {
            EntryKind::Directory
        } else if meta.is_file() {
            EntryKind::File
        } else {
            tracing::debug!(path = %path.display(), "skipping special file");
            continue;
        };

        result.push(ListedEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            size: if kind == EntryKind::File { meta.len() } else { 0 },
            path,
            kind,
            is_symlink,
        });
    }

    Ok(result)
}
