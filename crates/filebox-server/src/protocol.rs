//! Query parameters and response bodies of the HTTP API
//!
//! Field names follow the JSON shape browser clients already expect,
//! hence the camelCase renames.

use filebox_core::UploadOutcome;
use serde::{Deserialize, Serialize};

/// `?path=` on browse, upload and download. A missing path means the root.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathQuery {
    #[serde(default)]
    pub path: String,
}

/// `?query=&path=` on search.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub path: String,
}

/// `?path=&isDirectory=` on delete.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteQuery {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub is_directory: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: String,
    pub uploaded_count: usize,
    pub failed_count: usize,
}

impl From<&UploadOutcome> for UploadResponse {
    fn from(outcome: &UploadOutcome) -> Self {
        Self {
            message: outcome.message(),
            uploaded_count: outcome.accepted_count,
            failed_count: outcome.failed_count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
