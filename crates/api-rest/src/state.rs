//! Application state and dependency injection.
//!
//! The state carries explicitly constructed handles for the repository
//! service and the database pool rather than hidden process-wide
//! singletons. `main` opens the pool before serving and closes it on
//! shutdown.

use crate::config::ApiConfig;
use async_trait::async_trait;
use github_tracker_application::{
    ApplicationError, ApplicationResult, NewTrackedRepository, RepoFetcher, RepositoryService,
    TrackedRepositoryStore,
};
use github_tracker_domain::{RepositoryId, TrackedRepository};
use github_tracker_infrastructure::DatabasePool;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    /// API configuration
    pub config: Arc<ApiConfig>,

    /// Repository service
    pub repositories: Arc<RepositoryService>,

    /// Database pool, when backed by PostgreSQL (None for in-memory state)
    pub db: Option<DatabasePool>,
}

impl AppState {
    /// Create application state over the given service and pool.
    pub fn new(config: ApiConfig, repositories: RepositoryService, db: DatabasePool) -> Self {
        Self {
            config: Arc::new(config),
            repositories: Arc::new(repositories),
            db: Some(db),
        }
    }

    /// Create state backed by an in-memory store.
    ///
    /// Suitable for development and router-level tests; the fetcher is
    /// still injected so tests can point it at a mock upstream.
    pub fn in_memory(config: ApiConfig, fetcher: Arc<dyn RepoFetcher>) -> Self {
        let store = Arc::new(InMemoryTrackedRepositoryStore::new());
        Self {
            config: Arc::new(config),
            repositories: Arc::new(RepositoryService::new(store, fetcher)),
            db: None,
        }
    }
}

/// In-memory implementation of the record store port.
///
/// Mirrors the PostgreSQL store's contract, including the unique
/// constraint on `url` and monotonically increasing, never-reused ids.
pub struct InMemoryTrackedRepositoryStore {
    records: Mutex<BTreeMap<i64, TrackedRepository>>,
    next_id: AtomicI64,
}

impl InMemoryTrackedRepositoryStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(BTreeMap::new()),
            next_id: AtomicI64::new(0),
        }
    }
}

impl Default for InMemoryTrackedRepositoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TrackedRepositoryStore for InMemoryTrackedRepositoryStore {
    async fn insert(&self, repo: &NewTrackedRepository) -> ApplicationResult<TrackedRepository> {
        let mut records = self.records.lock();
        if records.values().any(|r| r.url == repo.url) {
            return Err(ApplicationError::Conflict(format!(
                "repository already tracked: {}",
                repo.url
            )));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let record = repo.clone().into_record(RepositoryId::new(id));
        records.insert(id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: RepositoryId) -> ApplicationResult<Option<TrackedRepository>> {
        Ok(self.records.lock().get(&id.as_i64()).cloned())
    }

    async fn update_stars(
        &self,
        id: RepositoryId,
        stars: i64,
    ) -> ApplicationResult<Option<TrackedRepository>> {
        let mut records = self.records.lock();
        Ok(records.get_mut(&id.as_i64()).map(|r| {
            r.stars = stars;
            r.clone()
        }))
    }

    async fn delete(&self, id: RepositoryId) -> ApplicationResult<bool> {
        Ok(self.records.lock().remove(&id.as_i64()).is_some())
    }
}
