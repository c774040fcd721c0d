//! The file store and its path resolution helpers
//!
//! The operations themselves live in sibling modules, one per operation,
//! each adding an `impl SandboxedFileStore` block.

use std::path::{Path, PathBuf};

use filebox_fs::{EntryKind, SandboxRoot};

use crate::{Error, Result};

/// A directory tree exposed for browsing, search, upload, download and
/// deletion, confined to a single root.
///
/// The store holds no state besides the root, so it can be shared freely
/// between concurrently handled requests. The filesystem is the only shared
/// resource and no coordination is layered on top of it.
#[derive(Debug, Clone)]
pub struct SandboxedFileStore {
    sandbox: SandboxRoot,
}

impl SandboxedFileStore {
    /// Open a store rooted at `root`, which must be an existing directory.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let sandbox = SandboxRoot::new(root)?;
        tracing::debug!(root = %sandbox.path().display(), "file store opened");
        Ok(Self { sandbox })
    }

    pub fn from_sandbox(sandbox: SandboxRoot) -> Self {
        Self { sandbox }
    }

    /// The canonical root directory.
    pub fn root(&self) -> &Path {
        self.sandbox.path()
    }

    pub(crate) fn sandbox(&self) -> &SandboxRoot {
        &self.sandbox
    }

    /// Resolve a request path, mapping a guard rejection to
    /// [`Error::PathTraversal`] that names what the caller sent.
    pub(crate) fn resolve(&self, relative: &str) -> Result<PathBuf> {
        self.sandbox.resolve(relative).map_err(|e| match e {
            filebox_fs::Error::PathTraversal { .. } => {
                tracing::warn!(path = relative, "rejected path outside store root");
                Error::PathTraversal {
                    path: relative.to_string(),
                }
            }
            other => Error::Fs(other),
        })
    }

    /// Resolve a request path that must name an existing directory.
    pub(crate) fn resolve_directory(&self, relative: &str) -> Result<PathBuf> {
        let resolved = self.resolve(relative)?;
        if !resolved.is_dir() {
            return Err(Error::not_found(relative, EntryKind::Directory));
        }
        Ok(resolved)
    }

    /// Resolve a request path that must name an existing regular file.
    pub(crate) fn resolve_file(&self, relative: &str) -> Result<PathBuf> {
        let resolved = self.resolve(relative)?;
        if !resolved.is_file() {
            return Err(Error::not_found(relative, EntryKind::File));
        }
        Ok(resolved)
    }
}
