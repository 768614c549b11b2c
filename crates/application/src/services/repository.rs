//! Repository service
//!
//! Orchestrates the four CRUD operations over tracked repositories:
//! fetching upstream metadata on create, mapping the raw payload into the
//! persisted record shape, and translating store absence into not-found
//! errors for read, update, and delete.

use crate::{ApplicationError, ApplicationResult};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use url::Url;

pub use github_tracker_domain::repository::NewTrackedRepository;
use github_tracker_domain::{RepositoryId, TrackedRepository};

/// Port for the persistent record store.
///
/// Implementations commit each operation immediately; there are no
/// multi-statement transactions spanning calls. A duplicate `url` on
/// insert must surface as [`ApplicationError::Conflict`].
#[async_trait]
pub trait TrackedRepositoryStore: Send + Sync {
    /// Insert a new record, returning it with its store-assigned id.
    async fn insert(&self, repo: &NewTrackedRepository) -> ApplicationResult<TrackedRepository>;

    /// Find a record by id. `None` means no row, not a failure.
    async fn find_by_id(&self, id: RepositoryId) -> ApplicationResult<Option<TrackedRepository>>;

    /// Overwrite `stars` for the given id, returning the updated record,
    /// or `None` when no row matches.
    async fn update_stars(
        &self,
        id: RepositoryId,
        stars: i64,
    ) -> ApplicationResult<Option<TrackedRepository>>;

    /// Delete by id. `false` when no row matched.
    async fn delete(&self, id: RepositoryId) -> ApplicationResult<bool>;
}

/// Port for the upstream repository metadata API.
///
/// One outbound call per invocation; no caching, no retry. The returned
/// JSON is passed through untouched, and schema validation happens in
/// the service, not the fetcher.
#[async_trait]
pub trait RepoFetcher: Send + Sync {
    /// Fetch raw repository metadata for `owner/repo`.
    async fn fetch_repo(&self, owner: &str, repo: &str) -> ApplicationResult<serde_json::Value>;
}

/// The subset of the upstream payload this service persists.
///
/// Typed extraction with named required fields: a payload missing any of
/// them fails with a mapping error rather than substituting defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct GithubRepoPayload {
    pub name: String,
    pub owner: GithubOwnerPayload,
    pub stargazers_count: i64,
    pub html_url: Url,
}

/// Nested `owner` object of the upstream payload.
#[derive(Debug, Clone, Deserialize)]
pub struct GithubOwnerPayload {
    pub login: String,
}

impl GithubRepoPayload {
    /// Extract the persisted fields from a raw upstream document.
    pub fn from_raw(raw: serde_json::Value) -> ApplicationResult<Self> {
        serde_json::from_value(raw)
            .map_err(|e| ApplicationError::Mapping(format!("unexpected upstream payload: {}", e)))
    }

    /// Convert into the insert shape for the record store.
    pub fn into_new_record(self) -> NewTrackedRepository {
        NewTrackedRepository {
            name: self.name,
            owner: self.owner.login,
            stars: self.stargazers_count,
            url: self.html_url,
        }
    }
}

/// Service implementing the CRUD orchestration over tracked repositories.
pub struct RepositoryService {
    store: Arc<dyn TrackedRepositoryStore>,
    fetcher: Arc<dyn RepoFetcher>,
}

impl RepositoryService {
    pub fn new(store: Arc<dyn TrackedRepositoryStore>, fetcher: Arc<dyn RepoFetcher>) -> Self {
        Self { store, fetcher }
    }

    /// Register a repository: fetch upstream metadata, map it into the
    /// record shape, and persist it.
    ///
    /// Upstream failures propagate as-is; a duplicate canonical URL
    /// surfaces as a conflict from the store, without a pre-check.
    #[instrument(skip(self))]
    pub async fn track(&self, owner: &str, repo_name: &str) -> ApplicationResult<TrackedRepository> {
        let raw = self.fetcher.fetch_repo(owner, repo_name).await?;
        let new_record = GithubRepoPayload::from_raw(raw)?.into_new_record();

        debug!(url = %new_record.url, "Mapped upstream payload");
        let record = self.store.insert(&new_record).await?;

        info!(id = %record.id, owner = %record.owner, name = %record.name, "Repository tracked");
        Ok(record)
    }

    /// Read a record by id.
    #[instrument(skip(self))]
    pub async fn get(&self, id: RepositoryId) -> ApplicationResult<TrackedRepository> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(format!("Repository {}", id)))
    }

    /// Overwrite the star count of an existing record.
    ///
    /// `stars` is the only mutable field; `name`, `owner`, `url`, and
    /// `id` are unchanged by this path.
    #[instrument(skip(self))]
    pub async fn update_stars(
        &self,
        id: RepositoryId,
        stars: i64,
    ) -> ApplicationResult<TrackedRepository> {
        let updated = self
            .store
            .update_stars(id, stars)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(format!("Repository {}", id)))?;

        debug!(id = %id, stars, "Star count updated");
        Ok(updated)
    }

    /// Permanently remove a record.
    #[instrument(skip(self))]
    pub async fn untrack(&self, id: RepositoryId) -> ApplicationResult<()> {
        if !self.store.delete(id).await? {
            return Err(ApplicationError::NotFound(format!("Repository {}", id)));
        }

        info!(id = %id, "Repository untracked");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_payload() -> serde_json::Value {
        json!({
            "id": 123456,
            "name": "fastapi",
            "full_name": "fastapi/fastapi",
            "owner": { "login": "fastapi", "type": "Organization" },
            "html_url": "https://github.com/fastapi/fastapi",
            "stargazers_count": 70123,
            "forks_count": 5900
        })
    }

    #[test]
    fn test_extraction_happy_path() {
        let payload = GithubRepoPayload::from_raw(full_payload()).unwrap();
        let record = payload.into_new_record();
        assert_eq!(record.name, "fastapi");
        assert_eq!(record.owner, "fastapi");
        assert_eq!(record.stars, 70123);
        assert_eq!(record.url.as_str(), "https://github.com/fastapi/fastapi");
    }

    #[test]
    fn test_extraction_ignores_extra_fields() {
        let mut raw = full_payload();
        raw["watchers_count"] = json!(9000);
        assert!(GithubRepoPayload::from_raw(raw).is_ok());
    }

    #[test]
    fn test_missing_owner_login_is_mapping_error() {
        let mut raw = full_payload();
        raw["owner"] = json!({ "type": "Organization" });
        let err = GithubRepoPayload::from_raw(raw).unwrap_err();
        assert!(matches!(err, ApplicationError::Mapping(_)));
    }

    #[test]
    fn test_missing_stargazers_is_mapping_error() {
        let mut raw = full_payload();
        raw.as_object_mut().unwrap().remove("stargazers_count");
        let err = GithubRepoPayload::from_raw(raw).unwrap_err();
        assert!(matches!(err, ApplicationError::Mapping(_)));
        assert_eq!(err.http_status(), 400);
    }

    #[test]
    fn test_invalid_html_url_is_mapping_error() {
        let mut raw = full_payload();
        raw["html_url"] = json!("not a url");
        let err = GithubRepoPayload::from_raw(raw).unwrap_err();
        assert!(matches!(err, ApplicationError::Mapping(_)));
    }

    #[test]
    fn test_non_object_payload_is_mapping_error() {
        let err = GithubRepoPayload::from_raw(json!("nope")).unwrap_err();
        assert!(matches!(err, ApplicationError::Mapping(_)));
    }
}
