//! Shared test utilities for the Filebox workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`tree`]: [`TestTree`] builder for temporary directory trees

pub mod tree;

pub use tree::TestTree;
