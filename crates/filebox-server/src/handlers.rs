//! Request handlers, one per route
//!
//! Store operations block on the filesystem, so every call into
//! [`SandboxedFileStore`] runs on the blocking thread pool.

use std::sync::Arc;

use axum::Json;
use axum::body::Body;
use axum::extract::{Extension, Multipart, Query};
use axum::http::{HeaderMap, HeaderValue, header};
use axum::response::{IntoResponse, Response};
use filebox_core::{BrowseListing, SandboxedFileStore, SearchReport, UploadFile};
use tokio_util::io::ReaderStream;

use crate::error::ApiError;
use crate::protocol::{DeleteQuery, MessageResponse, PathQuery, SearchQuery, UploadResponse};

pub type SharedStore = Arc<SandboxedFileStore>;

/// `GET /api/files/browse?path=`
pub async fn browse(
    Query(query): Query<PathQuery>,
    Extension(store): Extension<SharedStore>,
) -> Result<Json<BrowseListing>, ApiError> {
    let listing = run_blocking("browse", store, move |s| s.browse(&query.path)).await?;
    Ok(Json(listing))
}

/// `GET /api/files/search?query=&path=`
pub async fn search(
    Query(query): Query<SearchQuery>,
    Extension(store): Extension<SharedStore>,
) -> Result<Json<SearchReport>, ApiError> {
    let report =
        run_blocking("search", store, move |s| s.search(&query.query, &query.path)).await?;
    Ok(Json(report))
}

/// `POST /api/files/upload?path=` with a multipart body.
///
/// Every part carrying a non-empty file name is treated as a file. Other
/// parts, including the empty `filename=""` a browser sends for an unused
/// file input, are ignored.
pub async fn upload(
    Query(query): Query<PathQuery>,
    Extension(store): Extension<SharedStore>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut files = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        let name = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => continue,
        };
        let content = field.bytes().await?;
        files.push(UploadFile::new(name, content.to_vec()));
    }

    let outcome = run_blocking("upload", store, move |s| s.upload(&query.path, &files)).await?;
    Ok(Json(UploadResponse::from(&outcome)))
}

/// `GET /api/files/download?path=`
///
/// The body is streamed from the open file handle, which is released when
/// the stream ends or the client goes away.
pub async fn download(
    Query(query): Query<PathQuery>,
    Extension(store): Extension<SharedStore>,
) -> Result<Response, ApiError> {
    let download = run_blocking("download", store, move |s| s.download(&query.path)).await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/octet-stream"),
    );
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(download.len));
    headers.insert(
        header::CONTENT_DISPOSITION,
        content_disposition(&download.file_name)?,
    );

    let file = tokio::fs::File::from_std(download.file);
    let body = Body::from_stream(ReaderStream::new(file));
    Ok((headers, body).into_response())
}

/// `DELETE /api/files/delete?path=&isDirectory=`
pub async fn delete(
    Query(query): Query<DeleteQuery>,
    Extension(store): Extension<SharedStore>,
) -> Result<Json<MessageResponse>, ApiError> {
    run_blocking("delete", store, move |s| {
        s.delete(&query.path, query.is_directory)
    })
    .await?;
    Ok(Json(MessageResponse::new("Item deleted successfully")))
}

async fn run_blocking<T, F>(
    operation: &'static str,
    store: SharedStore,
    op: F,
) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&SandboxedFileStore) -> filebox_core::Result<T> + Send + 'static,
{
    match tokio::task::spawn_blocking(move || op(&store)).await {
        Ok(result) => result.map_err(|e| ApiError::from_core(operation, e)),
        Err(e) => {
            tracing::error!(operation, error = %e, "file store task failed");
            Err(ApiError::Internal)
        }
    }
}

/// `attachment` disposition carrying the name twice: an ASCII fallback in
/// `filename` and the exact UTF-8 name in `filename*` (RFC 6266).
fn content_disposition(file_name: &str) -> Result<HeaderValue, ApiError> {
    let fallback: String = file_name
        .chars()
        .map(|c| match c {
            ' '..='~' if c != '"' && c != '\\' => c,
            _ => '_',
        })
        .collect();

    let mut encoded = String::with_capacity(file_name.len());
    for byte in file_name.bytes() {
        if byte.is_ascii_alphanumeric() || b"!#$&+-.^_`|~".contains(&byte) {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }

    HeaderValue::from_str(&format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}"
    ))
    .map_err(|e| {
        tracing::error!(file_name, error = %e, "unrepresentable download file name");
        ApiError::Internal
    })
}
