//! Error types for filebox-core

use filebox_fs::EntryKind;

/// Result type for filebox-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in file store operations
///
/// Everything except [`Error::Fs`] is the caller's fault and is detected
/// before the filesystem is modified.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested path resolves outside the store root
    #[error("Path escapes the store root: {path}")]
    PathTraversal { path: String },

    /// The target does not exist or is the wrong kind of entry
    #[error("{} not found: {path}", capitalized(.kind))]
    NotFound { path: String, kind: EntryKind },

    /// Search was called with a blank query
    #[error("Search query cannot be empty")]
    EmptyQuery,

    /// Upload was called with no files
    #[error("No files provided")]
    NoFiles,

    /// Filesystem error from filebox-fs
    #[error(transparent)]
    Fs(#[from] filebox_fs::Error),
}

impl Error {
    pub(crate) fn not_found(path: &str, kind: EntryKind) -> Self {
        Self::NotFound {
            path: path.to_string(),
            kind,
        }
    }

    /// Whether the error was caused by the request rather than by the
    /// server or filesystem.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Fs(_))
    }
}

fn capitalized(kind: &EntryKind) -> &'static str {
    match kind {
        EntryKind::File => "File",
        EntryKind::Directory => "Directory",
    }
}
