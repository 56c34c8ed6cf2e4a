//! Schema creation for the schools table

use sqlx::PgPool;

use super::repos::DbError;

/// Create the schools table if it doesn't exist yet. Safe to run repeatedly.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), DbError> {
    tracing::debug!("Ensuring schools table exists");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schools (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            address VARCHAR(255) NOT NULL,
            city VARCHAR(100) NOT NULL,
            state VARCHAR(100) NOT NULL,
            contact VARCHAR(20) NOT NULL,
            image VARCHAR(255),
            email_id VARCHAR(255) NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
