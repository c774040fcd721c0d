//! Irreversible removal of files and directory trees

use std::fs;

use filebox_fs::EntryKind;

use crate::{Result, SandboxedFileStore};

impl SandboxedFileStore {
    /// Delete the entry at `relative`.
    ///
    /// With `is_directory` the target must be a directory and is removed
    /// together with everything below it; otherwise the target must be a
    /// file. Deleting the store root removes everything below it but keeps
    /// the root directory, so the store stays usable.
    pub fn delete(&self, relative: &str, is_directory: bool) -> Result<EntryKind> {
        if is_directory {
            let path = self.resolve_directory(relative)?;
            if path == self.root() {
                self.clear_root()?;
                tracing::info!("cleared store root");
                return Ok(EntryKind::Directory);
            }
            fs::remove_dir_all(&path).map_err(|e| filebox_fs::Error::io(&path, e))?;
            tracing::info!(path = relative, "deleted directory tree");
            Ok(EntryKind::Directory)
        } else {
            let path = self.resolve_file(relative)?;
            fs::remove_file(&path).map_err(|e| filebox_fs::Error::io(&path, e))?;
            tracing::info!(path = relative, "deleted file");
            Ok(EntryKind::File)
        }
    }

    fn clear_root(&self) -> Result<()> {
        let root = self.root();
        let entries = fs::read_dir(root).map_err(|e| filebox_fs::Error::io(root, e))?;

        for entry in entries {
            let entry = entry.map_err(|e| filebox_fs::Error::io(root, e))?;
            let path = entry.path();
            // file_type does not follow symlinks: a linked directory is unlinked, not emptied
            let file_type = entry
                .file_type()
                .map_err(|e| filebox_fs::Error::io(&path, e))?;
            let removed = if file_type.is_dir() {
                fs::remove_dir_all(&path)
            } else {
                fs::remove_file(&path)
            };
            removed.map_err(|e| filebox_fs::Error::io(&path, e))?;
        }
        Ok(())
    }
}
