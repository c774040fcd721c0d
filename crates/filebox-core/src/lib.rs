//! Sandboxed file store for Filebox
//!
//! [`SandboxedFileStore`] exposes a configured directory tree through five
//! operations: browse, search, upload, download and delete. Each one
//! resolves the caller's relative path through the containment guard in
//! `filebox-fs` before touching the filesystem.
//!
//! ```text
//!            HTTP transport (filebox-server)
//!                        |
//!              filebox-core (this crate)
//!                        |
//!     filebox-fs (SandboxRoot, list_dir, write_atomic)
//! ```
//!
//! All operations are synchronous. Expected conditions (path traversal,
//! missing targets, empty input) are returned as [`Error`] variants; a
//! failing file inside an upload batch is recorded in the
//! [`UploadOutcome`] instead.
//!
//! # Example
//!
//! ```no_run
//! use filebox_core::SandboxedFileStore;
//!
//! fn example() -> filebox_core::Result<()> {
//!     let store = SandboxedFileStore::new("wwwroot")?;
//!     let listing = store.browse("docs")?;
//!     for dir in &listing.directories {
//!         println!("{}/", dir.name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod browse;
pub mod delete;
pub mod download;
pub mod error;
pub mod search;
pub mod store;
pub mod upload;

pub use browse::{BrowseListing, DirectoryEntry};
pub use download::Download;
pub use error::{Error, Result};
pub use filebox_fs::EntryKind;
pub use search::{SearchReport, SearchResult};
pub use store::SandboxedFileStore;
pub use upload::{UploadFailure, UploadFailureReason, UploadFile, UploadOutcome};
