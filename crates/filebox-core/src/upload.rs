//! Batch upload into a directory of the store
//!
//! Each file in a batch is handled on its own. A file that fails is
//! recorded in the [`UploadOutcome`] and the rest of the batch carries on;
//! nothing is rolled back.

use std::fmt;
use std::path::Path;

use filebox_fs::io;

use crate::{Error, Result, SandboxedFileStore};

/// One file of an upload batch.
///
/// The name comes from the client and may contain `/` or `\` separated
/// subdirectories, which are created under the destination as needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub content: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// The last segment of the client-supplied name.
    pub fn base_name(&self) -> &str {
        self.name.rsplit(['/', '\\']).next().unwrap_or(&self.name)
    }
}

/// Why a single file of a batch was not stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadFailureReason {
    /// The name resolves outside the destination directory
    PathTraversal,
    /// The name resolves to the destination directory itself
    InvalidName,
    /// Creating directories or writing the file failed
    Io(String),
}

/// A file that was rejected or failed to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFailure {
    /// Base name of the file as the client sent it
    pub original_name: String,
    pub reason: UploadFailureReason,
}

impl fmt::Display for UploadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            UploadFailureReason::PathTraversal => {
                write!(f, "{} (path traversal detected)", self.original_name)
            }
            UploadFailureReason::InvalidName => write!(f, "{} (invalid name)", self.original_name),
            UploadFailureReason::Io(_) => write!(f, "{}", self.original_name),
        }
    }
}

/// Summary of an upload batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadOutcome {
    pub accepted_count: usize,
    /// Failures in the order the files were submitted
    pub failed_items: Vec<UploadFailure>,
}

impl UploadOutcome {
    pub fn failed_count(&self) -> usize {
        self.failed_items.len()
    }

    /// Human-readable summary, e.g.
    /// `"1 item(s) uploaded successfully. Failed: evil.txt (path traversal detected)"`.
    pub fn message(&self) -> String {
        let mut message = format!("{} item(s) uploaded successfully", self.accepted_count);
        if !self.failed_items.is_empty() {
            let failed: Vec<String> = self.failed_items.iter().map(ToString::to_string).collect();
            message.push_str(&format!(". Failed: {}", failed.join(", ")));
        }
        message
    }
}

impl SandboxedFileStore {
    /// Store `files` under the directory `relative`.
    ///
    /// The destination must already exist. Every file name is resolved
    /// against the destination (not the store root) and must stay inside
    /// it. Existing files are overwritten.
    ///
    /// Zero-length files are counted as accepted without writing anything.
    pub fn upload(&self, relative: &str, files: &[UploadFile]) -> Result<UploadOutcome> {
        let destination = self.resolve_directory(relative)?;

        if files.is_empty() {
            return Err(Error::NoFiles);
        }

        let mut outcome = UploadOutcome::default();
        for file in files {
            if file.is_empty() {
                tracing::debug!(name = %file.name, "empty upload accepted without writing");
                outcome.accepted_count += 1;
                continue;
            }

            match self.store_one(&destination, file) {
                Ok(()) => outcome.accepted_count += 1,
                Err(reason) => {
                    tracing::warn!(name = %file.name, reason = ?reason, "failed to upload file");
                    outcome.failed_items.push(UploadFailure {
                        original_name: file.base_name().to_string(),
                        reason,
                    });
                }
            }
        }

        tracing::info!(
            path = relative,
            accepted = outcome.accepted_count,
            failed = outcome.failed_count(),
            "upload"
        );
        Ok(outcome)
    }

    fn store_one(
        &self,
        destination: &Path,
        file: &UploadFile,
    ) -> std::result::Result<(), UploadFailureReason> {
        let target = self
            .sandbox()
            .resolve_within(destination, &file.name)
            .map_err(|e| match e {
                filebox_fs::Error::PathTraversal { .. } => UploadFailureReason::PathTraversal,
                other => UploadFailureReason::Io(other.to_string()),
            })?;

        if target == destination {
            return Err(UploadFailureReason::InvalidName);
        }

        io::write_atomic(&target, &file.content)
            .map_err(|e| UploadFailureReason::Io(e.to_string()))
    }
}
