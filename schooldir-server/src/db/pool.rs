//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits. The pool is built on
//! first use and shared by every request for the life of the process.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::OnceCell;

use super::repos::DbError;
use super::schema;
use crate::config::DbConfig;

/// Create a PostgreSQL connection pool.
///
/// # Errors
///
/// Returns an error if the connection fails.
pub async fn create_pool(config: &DbConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(config.connect_options())
        .await
}

/// Lazily connected database handle.
///
/// Nothing touches the network until [`Database::pool`] is first awaited.
/// Concurrent first callers share one connection attempt; a failed attempt
/// leaves the handle empty so the next caller tries again.
pub struct Database {
    config: DbConfig,
    pool: OnceCell<PgPool>,
}

impl Database {
    pub fn new(config: DbConfig) -> Self {
        Self {
            config,
            pool: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &DbConfig {
        &self.config
    }

    /// Get the shared pool, connecting and ensuring the schema on first call.
    pub async fn pool(&self) -> Result<&PgPool, DbError> {
        self.pool
            .get_or_try_init(|| async {
                tracing::info!(
                    host = %self.config.host,
                    port = self.config.port,
                    database = %self.config.database,
                    max_connections = self.config.max_connections,
                    "Connecting to database"
                );
                let pool = create_pool(&self.config).await?;
                schema::ensure_schema(&pool).await?;
                Ok::<_, DbError>(pool)
            })
            .await
    }

    /// Whether a connection has been established yet.
    pub fn is_connected(&self) -> bool {
        self.pool.initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_database_is_lazy() {
        let db = Database::new(DbConfig::default());
        assert!(!db.is_connected());
        assert_eq!(db.config().max_connections, 10);
    }

    // Integration tests require a real database
    // Run with: DB_HOST=... DB_USER=... cargo test -p schooldir-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn pool_acquires_connection() {
        let db = Database::new(DbConfig::from_env());
        let pool = db.pool().await.expect("pool creation failed");

        let result: (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(pool)
            .await
            .expect("query failed");

        assert_eq!(result.0, 1);
        assert!(db.is_connected());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn concurrent_first_use_shares_one_pool() {
        let db = std::sync::Arc::new(Database::new(DbConfig::from_env()));

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let db = db.clone();
                tokio::spawn(async move {
                    let pool = db.pool().await.expect("pool creation failed");
                    let result: (i32,) = sqlx::query_as("SELECT $1::int")
                        .bind(i)
                        .fetch_one(pool)
                        .await
                        .expect("concurrent query failed");
                    result.0
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let result = handle.await.expect("task panicked");
            assert_eq!(result, i as i32);
        }
    }
}
