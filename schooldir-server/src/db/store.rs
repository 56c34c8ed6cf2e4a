//! School storage trait and implementations
//!
//! Handlers talk to a `dyn SchoolStore` so they can run against:
//! - PostgreSQL (`PgSchoolStore`), the deployed configuration
//! - an in-process vector (`MemorySchoolStore`), for tests and database-free runs

use std::sync::Mutex;

use async_trait::async_trait;

use super::pool::Database;
use super::repos::{DbError, SchoolRepo};
use crate::models::{NewSchool, School, SchoolSummary, SearchTerm};

/// Trait for school persistence (testable)
#[async_trait]
pub trait SchoolStore: Send + Sync {
    /// Schools ordered newest first, optionally filtered.
    async fn list(&self, search: Option<&SearchTerm>) -> Result<Vec<SchoolSummary>, DbError>;

    /// Insert a validated school with its stored image path, returning the new id.
    async fn insert(&self, school: &NewSchool, image: &str) -> Result<i64, DbError>;
}

/// PostgreSQL-backed store using the lazily connected pool
pub struct PgSchoolStore {
    db: Database,
}

impl PgSchoolStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl SchoolStore for PgSchoolStore {
    async fn list(&self, search: Option<&SearchTerm>) -> Result<Vec<SchoolSummary>, DbError> {
        let pool = self.db.pool().await?;
        SchoolRepo::new(pool).list(search).await
    }

    async fn insert(&self, school: &NewSchool, image: &str) -> Result<i64, DbError> {
        let pool = self.db.pool().await?;
        SchoolRepo::new(pool).insert(school, image).await
    }
}

#[derive(Default)]
struct MemoryInner {
    records: Vec<School>,
    last_id: i64,
}

/// In-memory store with the same ordering and search semantics
#[derive(Default)]
pub struct MemorySchoolStore {
    inner: Mutex<MemoryInner>,
}

impl MemorySchoolStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored record, in insertion order.
    pub fn records(&self) -> Vec<School> {
        self.lock().records.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryInner> {
        // A panic while holding the lock can't leave the vector half-written
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl SchoolStore for MemorySchoolStore {
    async fn list(&self, search: Option<&SearchTerm>) -> Result<Vec<SchoolSummary>, DbError> {
        let inner = self.lock();
        Ok(inner
            .records
            .iter()
            .rev()
            .map(SchoolSummary::from)
            .filter(|s| search.map_or(true, |term| term.matches(s)))
            .collect())
    }

    async fn insert(&self, school: &NewSchool, image: &str) -> Result<i64, DbError> {
        let mut inner = self.lock();
        inner.last_id += 1;
        let id = inner.last_id;

        inner.records.push(School {
            id,
            name: school.name.clone(),
            address: school.address.clone(),
            city: school.city.clone(),
            state: school.state.clone(),
            contact: school.contact.clone(),
            image: Some(image.to_owned()),
            email: school.email.clone(),
        });

        Ok(id)
    }
}
