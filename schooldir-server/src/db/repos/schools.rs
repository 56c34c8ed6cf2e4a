//! School repository
//!
//! Parameterized SQL only; user input never reaches the query text.
//! - list: newest first, optional ILIKE search on name/address/city
//! - insert: single INSERT ... RETURNING id

use sqlx::PgPool;

use crate::models::{NewSchool, SchoolSummary, SearchTerm};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// School repository
pub struct SchoolRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> SchoolRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List schools ordered by id descending.
    pub async fn list(&self, search: Option<&SearchTerm>) -> Result<Vec<SchoolSummary>, DbError> {
        let pattern = search.map(SearchTerm::like_pattern);

        let rows = sqlx::query_as::<_, SchoolSummary>(
            r#"
            SELECT id, name, address, city, image
            FROM schools
            WHERE $1::text IS NULL
               OR name ILIKE $1
               OR address ILIKE $1
               OR city ILIKE $1
            ORDER BY id DESC
            "#,
        )
        .bind(pattern)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Insert a validated school, returning its new id.
    pub async fn insert(&self, school: &NewSchool, image: &str) -> Result<i64, DbError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO schools (name, address, city, state, contact, image, email_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&school.name)
        .bind(&school.address)
        .bind(&school.city)
        .bind(&school.state)
        .bind(&school.contact)
        .bind(image)
        .bind(&school.email)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }
}
