//! HTTP server for Filebox
//!
//! Exposes a [`filebox_core::SandboxedFileStore`] over HTTP so a browser
//! front end can manage the files below a single configured directory.
//!
//! # Architecture
//!
//! ```text
//! [ HTTP client ]
//!        | (JSON, multipart, octet-stream)
//!        v
//! [ filebox-server (axum router) ]
//!        | (blocking calls on the tokio blocking pool)
//!        v
//! [ filebox-core (SandboxedFileStore) ]
//!        |
//!        +--> [ home directory on disk ]
//! ```
//!
//! # Routes
//!
//! | Route                      | Verb   | Parameters                    |
//! |----------------------------|--------|-------------------------------|
//! | `/api/files/browse`        | GET    | `path`                        |
//! | `/api/files/search`        | GET    | `query`, `path`               |
//! | `/api/files/upload`        | POST   | `path`, multipart body        |
//! | `/api/files/download`      | GET    | `path`                        |
//! | `/api/files/delete`        | DELETE | `path`, `isDirectory`         |

pub mod config;
pub mod error;
pub mod handlers;
pub mod protocol;
pub mod server;

pub use config::ServerConfig;
pub use error::{ApiError, Error, Result};
pub use server::{FileboxServer, router};
