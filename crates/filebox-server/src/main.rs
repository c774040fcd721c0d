//! Filebox server
//!
//! Serves a single directory tree over HTTP for browsing, searching,
//! uploading, downloading and deleting files.
//!
//! # Usage
//!
//! ```bash
//! filebox-server [--config <file>] [--home-directory <dir>] [--bind <addr>]
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Control log verbosity
//!   (default: `filebox_server=info,filebox_core=info,tower_http=info`)
//! - `FILEBOX_HOME_DIRECTORY`, `FILEBOX_BIND`, `FILEBOX_MAX_UPLOAD_BYTES`:
//!   same as the flags

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use filebox_server::{FileboxServer, ServerConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// HTTP file manager for a single directory
#[derive(Parser)]
#[command(name = "filebox-server")]
#[command(about = "HTTP file manager for a single directory")]
#[command(version)]
struct Args {
    /// Configuration file (TOML, JSON or YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory to serve
    #[arg(long, env = "FILEBOX_HOME_DIRECTORY")]
    home_directory: Option<PathBuf>,

    /// Address to listen on
    #[arg(short, long, env = "FILEBOX_BIND")]
    bind: Option<SocketAddr>,

    /// Maximum size of an upload request body in bytes
    #[arg(long, env = "FILEBOX_MAX_UPLOAD_BYTES")]
    max_upload_bytes: Option<usize>,
}

impl Args {
    fn apply(self, mut config: ServerConfig) -> ServerConfig {
        if let Some(home) = self.home_directory {
            config.home_directory = home;
        }
        if let Some(bind) = self.bind {
            config.bind = bind;
        }
        if let Some(max) = self.max_upload_bytes {
            config.max_upload_bytes = max;
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let args = Args::parse();
    let config = ServerConfig::load(args.config.as_deref())?;
    let config = args.apply(config);

    tracing::info!(
        home = %config.home_directory.display(),
        bind = %config.bind,
        "starting filebox server"
    );

    FileboxServer::new(config)?.run().await?;
    Ok(())
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "filebox_server=info,filebox_core=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
