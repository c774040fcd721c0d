//! Server configuration
//!
//! Values come from three layers, later ones winning: built-in defaults,
//! an optional TOML/JSON/YAML file, and command-line flags or their
//! `FILEBOX_*` environment variables (applied in `main`).

use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use filebox_fs::ConfigStore;
use serde::Deserialize;

use crate::Result;

/// 100 MiB
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Directory exposed by the file store, relative to the working
    /// directory unless absolute
    pub home_directory: PathBuf,
    pub bind: SocketAddr,
    /// Upper bound on a whole upload request body
    pub max_upload_bytes: usize,
    /// Create the home directory at startup if it does not exist
    pub create_home: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            home_directory: PathBuf::from("wwwroot"),
            bind: SocketAddr::from((Ipv4Addr::LOCALHOST, 5000)),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            create_home: true,
        }
    }
}

impl ServerConfig {
    /// Defaults, overlaid with the file at `path` when one is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let config: Self = ConfigStore::new().load(path)?;
                tracing::debug!(path = %path.display(), "loaded server configuration");
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }
}
