//! HTTP server command
//!
//! Runs the schooldir API with the school routes, health check and
//! static image serving.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use schooldir_server::db::{Database, MemorySchoolStore, PgSchoolStore, SchoolStore};
use schooldir_server::{run_server, AppConfig, AppState, ServerConfig};

use super::DbArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "BIND_ADDR", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    #[command(flatten)]
    pub db: DbArgs,

    /// Reject new submissions with 403 (also enabled by DB_READ_ONLY=true)
    #[arg(long)]
    pub read_only: bool,

    /// While read-only, serve the built-in demo listing instead of querying storage
    #[arg(long)]
    pub static_listing: bool,

    /// Directory uploaded images are written to and served from
    #[arg(long)]
    pub upload_dir: Option<PathBuf>,

    /// Request body limit for submissions, in bytes
    #[arg(long)]
    pub max_upload_bytes: Option<usize>,

    /// Keep schools in memory instead of PostgreSQL (data is lost on exit)
    #[arg(long)]
    pub in_memory: bool,
}

impl ServeArgs {
    /// Environment config with flags layered on top.
    fn app_config(&self) -> AppConfig {
        let mut config = AppConfig::from_env();
        config.read_only |= self.read_only;
        config.static_listing |= self.static_listing;
        if let Some(dir) = &self.upload_dir {
            config.upload_dir = dir.clone();
        }
        if let Some(limit) = self.max_upload_bytes {
            config.max_upload_bytes = limit;
        }
        config
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let app_config = args.app_config();

    let store: Arc<dyn SchoolStore> = if args.in_memory {
        tracing::warn!("Using in-memory storage; schools are lost on exit");
        Arc::new(MemorySchoolStore::new())
    } else {
        let db_config = args.db.resolve();
        tracing::info!(
            host = %db_config.host,
            database = %db_config.database,
            "Database configured (connects on first request)"
        );
        Arc::new(PgSchoolStore::new(Database::new(db_config)))
    };

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    tracing::info!("Starting schooldir server on {}", args.bind);

    // Run server (blocks until shutdown)
    run_server(AppState::new(store, app_config), config)
        .await
        .context("Server error")?;

    Ok(())
}
