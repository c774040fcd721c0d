//! Recursive, case-insensitive name search

use std::io::ErrorKind;
use std::path::Path;

use filebox_fs::{EntryKind, ListedEntry, list_dir};
use serde::Serialize;

use crate::{Error, Result, SandboxedFileStore};

/// A directory or file whose name contains the search query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Path relative to the store root, `/`-separated on every platform
    #[serde(rename = "fullPath")]
    pub relative_path: String,
    /// Only present for files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

/// Result of [`SandboxedFileStore::search`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchReport {
    pub query: String,
    pub path: String,
    pub total_results: usize,
    pub directories: Vec<SearchResult>,
    pub files: Vec<SearchResult>,
}

impl SandboxedFileStore {
    /// Find every entry below `relative` whose name contains `query`,
    /// ignoring case.
    ///
    /// The walk is depth-first: a directory's subdirectories are searched
    /// completely before its own files are matched. Beyond that the order
    /// of results follows filesystem enumeration and is not sorted.
    ///
    /// Subtrees that cannot be read for lack of permission are skipped.
    /// Symlinked directories are matched by name but not descended into.
    pub fn search(&self, query: &str, relative: &str) -> Result<SearchReport> {
        if query.trim().is_empty() {
            return Err(Error::EmptyQuery);
        }

        let start = self.resolve_directory(relative)?;
        let needle = query.to_lowercase();

        let mut matches = Vec::new();
        self.walk(&start, &needle, &mut matches)?;

        let (directories, files): (Vec<_>, Vec<_>) = matches
            .into_iter()
            .partition(|m| m.kind == EntryKind::Directory);

        tracing::info!(query, path = relative, count = directories.len() + files.len(), "search");

        Ok(SearchReport {
            query: query.to_string(),
            path: relative.to_string(),
            total_results: directories.len() + files.len(),
            directories,
            files,
        })
    }

    fn walk(&self, dir: &Path, needle: &str, matches: &mut Vec<SearchResult>) -> Result<()> {
        let entries = match list_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.io_kind() == Some(ErrorKind::PermissionDenied) => {
                tracing::warn!(dir = %dir.display(), "access denied while searching, skipping");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let (directories, files): (Vec<_>, Vec<_>) = entries
            .into_iter()
            .partition(|e| e.kind == EntryKind::Directory);

        for entry in &directories {
            if name_matches(&entry.name, needle) {
                matches.push(self.to_result(entry));
            }
            if !entry.is_symlink {
                self.walk(&entry.path, needle, matches)?;
            }
        }

        for entry in &files {
            if name_matches(&entry.name, needle) {
                matches.push(self.to_result(entry));
            }
        }

        Ok(())
    }

    fn to_result(&self, entry: &ListedEntry) -> SearchResult {
        let relative_path = self
            .sandbox()
            .relative_display(&entry.path)
            .unwrap_or_else(|| entry.path.to_string_lossy().into_owned());

        SearchResult {
            name: entry.name.clone(),
            kind: entry.kind,
            relative_path,
            size: (entry.kind == EntryKind::File).then_some(entry.size),
        }
    }
}

fn name_matches(name: &str, needle: &str) -> bool {
    name.to_lowercase().contains(needle)
}
