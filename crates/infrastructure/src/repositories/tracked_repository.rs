//! Tracked repository store implementation.
//!
//! PostgreSQL-backed persistence for repository records. Each operation
//! is a single auto-committed statement; the unique constraint on `url`
//! is the only uniqueness enforcement, surfaced as a conflict when the
//! database rejects a duplicate insert.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};
use tracing::{debug, instrument};
use url::Url;

use github_tracker_application::{
    ApplicationError, ApplicationResult, NewTrackedRepository, TrackedRepositoryStore,
};
use github_tracker_domain::{RepositoryId, TrackedRepository};

/// PostgreSQL implementation of the record store port.
pub struct PgTrackedRepositoryStore {
    pool: PgPool,
}

impl PgTrackedRepositoryStore {
    /// Create a new PostgreSQL record store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a record.
    ///
    /// A stored `url` that no longer parses is an error, never a
    /// truncated or defaulted record.
    fn row_to_record(row: PgRow) -> ApplicationResult<TrackedRepository> {
        let raw_url: String = row.get("url");
        let url = Url::parse(&raw_url).map_err(|e| {
            ApplicationError::Internal(format!("stored url {:?} is not valid: {}", raw_url, e))
        })?;

        Ok(TrackedRepository {
            id: RepositoryId::new(row.get::<i64, _>("id")),
            name: row.get("name"),
            owner: row.get("owner"),
            stars: row.get("stars"),
            url,
        })
    }

    fn map_db_error(e: sqlx::Error, url: &Url) -> ApplicationError {
        match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                ApplicationError::Conflict(format!("repository already tracked: {}", url))
            }
            _ => ApplicationError::ServiceUnavailable(format!("database error: {}", e)),
        }
    }
}

#[async_trait]
impl TrackedRepositoryStore for PgTrackedRepositoryStore {
    #[instrument(skip(self, repo), fields(url = %repo.url))]
    async fn insert(&self, repo: &NewTrackedRepository) -> ApplicationResult<TrackedRepository> {
        let row = sqlx::query(
            r#"
            INSERT INTO repositories (name, owner, stars, url)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, owner, stars, url
            "#,
        )
        .bind(&repo.name)
        .bind(&repo.owner)
        .bind(repo.stars)
        .bind(repo.url.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::map_db_error(e, &repo.url))?;

        let record = Self::row_to_record(row)?;
        debug!(id = %record.id, "Repository record created");
        Ok(record)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: RepositoryId) -> ApplicationResult<Option<TrackedRepository>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, owner, stars, url
            FROM repositories
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ApplicationError::ServiceUnavailable(format!("database error: {}", e)))?;

        row.map(Self::row_to_record).transpose()
    }

    #[instrument(skip(self))]
    async fn update_stars(
        &self,
        id: RepositoryId,
        stars: i64,
    ) -> ApplicationResult<Option<TrackedRepository>> {
        let row = sqlx::query(
            r#"
            UPDATE repositories
            SET stars = $2
            WHERE id = $1
            RETURNING id, name, owner, stars, url
            "#,
        )
        .bind(id.as_i64())
        .bind(stars)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ApplicationError::ServiceUnavailable(format!("database error: {}", e)))?;

        if row.is_some() {
            debug!(id = %id, stars, "Star count persisted");
        }
        row.map(Self::row_to_record).transpose()
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: RepositoryId) -> ApplicationResult<bool> {
        let result = sqlx::query("DELETE FROM repositories WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| ApplicationError::ServiceUnavailable(format!("database error: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}
