//! Containment guard for caller-supplied paths
//!
//! Every path a client sends is untrusted. [`SandboxRoot::resolve`] joins it
//! onto the configured root, eliminates `.` and `..` segments lexically and
//! then refuses anything that does not sit at or below the root.
//!
//! The comparison is done on path components, never on raw characters, so a
//! root of `/data` does not admit `/data2` or `/database`.

use std::path::{Component, MAIN_SEPARATOR, Path, PathBuf};

use crate::{Error, Result};

/// The single directory all file store operations are confined to.
///
/// The root is canonicalized once at construction. Resolution afterwards is
/// purely lexical and does not touch the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxRoot {
    root: PathBuf,
}

impl SandboxRoot {
    /// Canonicalize `root` and use it as the sandbox boundary.
    ///
    /// Fails with [`Error::RootNotFound`] when `root` is missing or is not a
    /// directory.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let canonical = dunce::canonicalize(root).map_err(|_| Error::RootNotFound {
            path: root.to_path_buf(),
        })?;

        if !canonical.is_dir() {
            return Err(Error::RootNotFound {
                path: root.to_path_buf(),
            });
        }

        Ok(Self { root: canonical })
    }

    /// The canonical root directory.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Resolve a caller-supplied relative path against the root.
    ///
    /// An empty path resolves to the root itself.
    pub fn resolve(&self, relative: &str) -> Result<PathBuf> {
        resolve_against(&self.root, relative)
    }

    /// Resolve `relative` against `base`, an already-resolved directory
    /// inside this root, and require the result to stay under `base`.
    ///
    /// Uploaded file names are checked this way: they may carry their own
    /// subdirectories but must land inside the destination directory.
    pub fn resolve_within(&self, base: &Path, relative: &str) -> Result<PathBuf> {
        if !is_contained(&self.root, base) {
            return Err(Error::PathTraversal {
                path: base.to_path_buf(),
            });
        }
        resolve_against(base, relative)
    }

    /// Whether `candidate` is the root or nested below it.
    pub fn contains(&self, candidate: &Path) -> bool {
        is_contained(&self.root, candidate)
    }

    /// Express `path` relative to the root using `/` separators.
    ///
    /// Returns `None` when `path` is not under the root.
    pub fn relative_display(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let segments: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(segments.join("/"))
    }
}

/// Join `relative` onto `base`, clean it, and check containment.
pub fn resolve_against(base: &Path, relative: &str) -> Result<PathBuf> {
    let native = to_native_separators(relative);
    let joined = if native.is_empty() {
        base.to_path_buf()
    } else {
        base.join(native)
    };

    let resolved = normalize_lexically(&joined);
    if is_contained(base, &resolved) {
        Ok(resolved)
    } else {
        tracing::debug!(
            base = %base.display(),
            requested = relative,
            resolved = %resolved.display(),
            "path rejected by containment guard"
        );
        Err(Error::PathTraversal { path: resolved })
    }
}

/// Segment-wise containment: `candidate` equals `base` or has every
/// component of `base` as its leading components.
pub fn is_contained(base: &Path, candidate: &Path) -> bool {
    candidate.starts_with(base)
}

/// Eliminate `.` and `..` components without consulting the filesystem.
///
/// `..` at a filesystem root stays at the root.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(segment) => out.push(segment),
        }
    }
    out
}

fn to_native_separators(input: &str) -> String {
    input
        .chars()
        .map(|c| if c == '/' || c == '\\' { MAIN_SEPARATOR } else { c })
        .collect()
}
