//! schooldir CLI - public school directory service
//!
//! Entry point for the `schooldir` binary:
//! - `serve`: run the HTTP API (listing, search, submissions, images)
//! - `init-db`: create the schools table ahead of the first request

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "schooldir",
    author,
    version,
    about = "Public directory of schools with image uploads",
    long_about = "Serve a JSON API for listing, searching and adding schools. \
                  Schools live in PostgreSQL; uploaded images are written to a public directory."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create the schools table if it doesn't exist
    InitDb(commands::init_db::InitDbArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before clap so env-backed flags see it
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::InitDb(args) => commands::run_init_db(args).await?,
    }
    Ok(())
}
