//! PostgreSQL implementation of the mapping repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{Mapping, NewMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::StoreError;

#[derive(sqlx::FromRow)]
struct MappingRow {
    id: i64,
    code: String,
    destination: String,
    created_at: DateTime<Utc>,
}

impl From<MappingRow> for Mapping {
    fn from(row: MappingRow) -> Self {
        Mapping::new(row.id, row.code, row.destination, row.created_at)
    }
}

/// PostgreSQL repository for short code mappings.
///
/// Both `code` and `destination` carry unique constraints, so a racing
/// insert is rejected by the database rather than by an application check.
/// Every query is abandoned after `operation_timeout`.
pub struct PgMappingRepository {
    pool: Arc<PgPool>,
    operation_timeout: Duration,
}

impl PgMappingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>, operation_timeout: Duration) -> Self {
        Self {
            pool,
            operation_timeout,
        }
    }

    async fn bounded<T, F>(&self, query: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        with_timeout(self.operation_timeout, query).await
    }
}

/// Runs `query`, abandoning it after `limit`.
///
/// An elapsed limit is reported as [`StoreError::Unavailable`], never as a
/// missing row.
async fn with_timeout<T, F>(limit: Duration, query: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(limit, query).await {
        Ok(result) => result.map_err(StoreError::from),
        Err(_) => Err(StoreError::Unavailable(format!(
            "operation timed out after {}ms",
            limit.as_millis()
        ))),
    }
}

#[async_trait]
impl MappingRepository for PgMappingRepository {
    async fn insert(&self, new_mapping: NewMapping) -> Result<Mapping, StoreError> {
        let row = self
            .bounded(
                sqlx::query_as::<_, MappingRow>(
                    r#"
                    INSERT INTO mappings (code, destination)
                    VALUES ($1, $2)
                    RETURNING id, code, destination, created_at
                    "#,
                )
                .bind(&new_mapping.code)
                .bind(&new_mapping.destination)
                .fetch_one(self.pool.as_ref()),
            )
            .await?;

        Ok(row.into())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Mapping>, StoreError> {
        let row = self
            .bounded(
                sqlx::query_as::<_, MappingRow>(
                    r#"
                    SELECT id, code, destination, created_at
                    FROM mappings
                    WHERE code = $1
                    "#,
                )
                .bind(code)
                .fetch_optional(self.pool.as_ref()),
            )
            .await?;

        Ok(row.map(Mapping::from))
    }

    async fn find_by_destination(
        &self,
        destination: &str,
    ) -> Result<Option<Mapping>, StoreError> {
        let row = self
            .bounded(
                sqlx::query_as::<_, MappingRow>(
                    r#"
                    SELECT id, code, destination, created_at
                    FROM mappings
                    WHERE destination = $1
                    "#,
                )
                .bind(destination)
                .fetch_optional(self.pool.as_ref()),
            )
            .await?;

        Ok(row.map(Mapping::from))
    }

    async fn count(&self) -> Result<i64, StoreError> {
        self.bounded(
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM mappings")
                .fetch_one(self.pool.as_ref()),
        )
        .await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.bounded(sqlx::query("SELECT 1").execute(self.pool.as_ref()))
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;
    use std::time::Instant;

    #[tokio::test]
    async fn test_stalled_query_is_unavailable() {
        let started = Instant::now();

        let result = with_timeout(
            Duration::from_millis(50),
            std::future::pending::<Result<Option<i64>, sqlx::Error>>(),
        )
        .await;

        assert!(matches!(result, Err(StoreError::Unavailable(_))));
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_query_within_limit_passes_through() {
        let found = with_timeout(Duration::from_millis(50), async {
            Ok::<_, sqlx::Error>(Some(7i64))
        })
        .await;
        assert_eq!(found, Ok(Some(7)));

        let failed = with_timeout(Duration::from_millis(50), async {
            Err::<(), _>(sqlx::Error::PoolTimedOut)
        })
        .await;
        assert!(matches!(failed, Err(StoreError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_repository_applies_operation_timeout() {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/shorty_unused")
            .unwrap();
        let repo = PgMappingRepository::new(Arc::new(pool), Duration::from_millis(50));
        let started = Instant::now();

        let result = repo
            .bounded(std::future::pending::<Result<(), sqlx::Error>>())
            .await;

        assert!(matches!(result, Err(StoreError::Unavailable(_))));
        assert!(started.elapsed() < Duration::from_secs(2));
    }
}
