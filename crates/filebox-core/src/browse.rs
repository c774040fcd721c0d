//! Non-recursive directory listing

use filebox_fs::{EntryKind, list_dir};
use serde::Serialize;

use crate::{Result, SandboxedFileStore};

/// An immediate child of a browsed directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Only present for files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

/// Result of [`SandboxedFileStore::browse`].
///
/// Both partitions are sorted by name with an ordinal comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrowseListing {
    /// The path as requested
    pub path: String,
    pub directories: Vec<DirectoryEntry>,
    pub files: Vec<DirectoryEntry>,
}

impl SandboxedFileStore {
    /// List the directories and files directly inside `relative`.
    pub fn browse(&self, relative: &str) -> Result<BrowseListing> {
        let dir = self.resolve_directory(relative)?;
        let entries = list_dir(&dir)?;

        let mut directories = Vec::new();
        let mut files = Vec::new();
        for entry in entries {
            match entry.kind {
                EntryKind::Directory => directories.push(DirectoryEntry {
                    name: entry.name,
                    kind: EntryKind::Directory,
                    size: None,
                }),
                EntryKind::File => files.push(DirectoryEntry {
                    name: entry.name,
                    kind: EntryKind::File,
                    size: Some(entry.size),
                }),
            }
        }

        // Stable sort: equal names keep enumeration order
        directories.sort_by(|a, b| a.name.cmp(&b.name));
        files.sort_by(|a, b| a.name.cmp(&b.name));

        tracing::info!(
            path = relative,
            directories = directories.len(),
            files = files.len(),
            "browse"
        );

        Ok(BrowseListing {
            path: relative.to_string(),
            directories,
            files,
        })
    }
}
