//! Atomic file writes

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::{Error, Result};

/// Write content atomically to a file, replacing whatever was there.
///
/// Missing parent directories are created. The bytes go to a uniquely
/// named temporary sibling first and are renamed over the destination, so
/// a concurrent reader sees either the old file or one complete new one.
/// Concurrent writers to the same path never share a temp file; the last
/// rename wins.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    create_dir_all(parent)?;

    // Same directory keeps the rename on one filesystem
    let mut temp = NamedTempFile::new_in(parent).map_err(|e| Error::io(parent, e))?;
    temp.write_all(content)
        .map_err(|e| Error::io(temp.path(), e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| Error::io(temp.path(), e))?;

    // On failure the returned handle is dropped, which removes the temp file
    temp.persist(path).map_err(|e| Error::io(path, e.error))?;
    Ok(())
}

/// Create `dir` and any missing ancestors.
pub fn create_dir_all(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))
}

/// Read a whole file as UTF-8 text.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}
