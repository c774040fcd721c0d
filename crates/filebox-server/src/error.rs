//! Error types for the HTTP server

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use filebox_core::EntryKind;
use thiserror::Error;

/// Result type alias for server setup and lifecycle
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can stop the server from starting or running
#[derive(Debug, Error)]
pub enum Error {
    /// Error from the file store
    #[error("file store error: {0}")]
    Core(#[from] filebox_core::Error),

    /// Error from the filesystem layer (config loading, home directory)
    #[error(transparent)]
    Fs(#[from] filebox_fs::Error),

    /// Socket or runtime I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A failed request, as seen by the client.
///
/// Client errors carry a short fixed message. Unexpected failures are
/// logged with full detail and reach the client only as a generic 500.
#[derive(Debug, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(&'static str),
    NotFound(&'static str),
    PayloadTooLarge,
    Internal,
}

impl ApiError {
    /// Map a file store error, logging unexpected ones with the operation
    /// that hit them.
    pub fn from_core(operation: &'static str, error: filebox_core::Error) -> Self {
        use filebox_core::Error as CoreError;

        match error {
            CoreError::PathTraversal { .. } => Self::BadRequest("Invalid path"),
            CoreError::NotFound {
                kind: EntryKind::Directory,
                ..
            } => Self::NotFound("Directory not found"),
            CoreError::NotFound {
                kind: EntryKind::File,
                ..
            } => Self::NotFound("File not found"),
            CoreError::EmptyQuery => Self::BadRequest("Search query cannot be empty"),
            CoreError::NoFiles => Self::BadRequest("No files provided"),
            CoreError::Fs(e) => {
                tracing::error!(operation, error = %e, "file store operation failed");
                Self::Internal
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::BadRequest(msg) | Self::NotFound(msg) => msg,
            Self::PayloadTooLarge => "Upload exceeds the size limit",
            Self::Internal => "Internal server error",
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(error: MultipartError) -> Self {
        if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
            tracing::warn!(error = %error, "upload body over size limit");
            Self::PayloadTooLarge
        } else {
            tracing::warn!(error = %error, "malformed multipart body");
            Self::BadRequest("Invalid multipart body")
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.message()).into_response()
    }
}
