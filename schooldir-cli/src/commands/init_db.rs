//! Database bootstrap command
//!
//! Connects once and makes sure the schools table exists.

use anyhow::{Context, Result};
use clap::Parser;

use schooldir_server::db::Database;

use super::DbArgs;

/// Arguments for the init-db command
#[derive(Parser, Debug)]
pub struct InitDbArgs {
    #[command(flatten)]
    pub db: DbArgs,
}

/// Create the schools table if it is missing
pub async fn run_init_db(args: InitDbArgs) -> Result<()> {
    let config = args.db.resolve();
    let db = Database::new(config.clone());

    // Building the pool runs the schema check
    db.pool().await.with_context(|| {
        format!(
            "Failed to prepare database {} on {}:{}",
            config.database, config.host, config.port
        )
    })?;

    tracing::info!(database = %config.database, "Schema ready");
    Ok(())
}
