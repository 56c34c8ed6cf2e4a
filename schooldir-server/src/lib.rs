//! schooldir-server: HTTP API for a public directory of schools
//!
//! Lists and searches schools stored in PostgreSQL, and accepts new
//! schools as multipart submissions with an uploaded image.

pub mod config;
pub mod db;
pub mod http;
pub mod models;
pub mod uploads;

pub use config::{AppConfig, DbConfig};
pub use http::{build_router, run_server, AppState, ServerConfig};
