//! Filesystem layer for Filebox
//!
//! Provides the containment guard that confines every request to a single
//! configured root, plus the small set of filesystem primitives the file
//! store is built on: directory listing, atomic writes and config loading.

pub mod config;
pub mod error;
pub mod io;
pub mod listing;
pub mod sandbox;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use listing::{EntryKind, ListedEntry, list_dir};
pub use sandbox::SandboxRoot;
