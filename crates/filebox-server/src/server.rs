//! Router assembly and server lifecycle

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use axum::extract::{DefaultBodyLimit, Extension};
use axum::routing::{delete, get, post};
use filebox_core::SandboxedFileStore;
use filebox_fs::io;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::handlers::{self, SharedStore};
use crate::{Result, ServerConfig};

/// Build the `/api/files` router around an open store.
pub fn router(store: SharedStore, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/api/files/browse", get(handlers::browse))
        .route("/api/files/search", get(handlers::search))
        .route(
            "/api/files/upload",
            post(handlers::upload).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/api/files/download", get(handlers::download))
        .route("/api/files/delete", delete(handlers::delete))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(store))
}

/// A configured server with its store already opened.
#[derive(Debug)]
pub struct FileboxServer {
    config: ServerConfig,
    store: SharedStore,
}

impl FileboxServer {
    /// Open the home directory, creating it first if configured to.
    pub fn new(config: ServerConfig) -> Result<Self> {
        if config.create_home && !config.home_directory.exists() {
            io::create_dir_all(&config.home_directory)?;
            tracing::info!(home = %config.home_directory.display(), "created home directory");
        }

        let store = SandboxedFileStore::new(&config.home_directory)?;
        Ok(Self {
            config,
            store: Arc::new(store),
        })
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn store(&self) -> &SandboxedFileStore {
        &self.store
    }

    pub fn router(&self) -> Router {
        router(self.store.clone(), self.config.max_upload_bytes)
    }

    /// Bind the configured address and serve until Ctrl-C.
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(self.config.bind).await?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tracing::info!(
            addr = %listener.local_addr()?,
            home = %self.store.root().display(),
            "filebox server listening"
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("filebox server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
