//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - One lazily built pool per process (max 10 connections by default)
//! - Schema is ensured once, when the pool is first built
//! - Parameterized queries only

pub mod pool;
pub mod repos;
pub mod schema;
pub mod store;

pub use pool::{create_pool, Database};
pub use repos::*;
pub use schema::ensure_schema;
pub use store::{MemorySchoolStore, PgSchoolStore, SchoolStore};
