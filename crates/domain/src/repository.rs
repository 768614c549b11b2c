//! Tracked repository entity.

use crate::identifiers::RepositoryId;
use serde::{Deserialize, Serialize};
use url::Url;

/// Persisted snapshot of one GitHub repository.
///
/// Created only from a successful upstream fetch; `stars` is the sole
/// field that may change afterwards, via an explicit client update.
/// `url` is typed, so a record cannot exist or serialize with a value
/// that is not a syntactically valid URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedRepository {
    pub id: RepositoryId,
    pub name: String,
    pub owner: String,
    pub stars: i64,
    pub url: Url,
}

impl TrackedRepository {
    /// Copy of this record with `stars` replaced.
    ///
    /// Everything else is carried over untouched; the update path must
    /// not be able to mutate `name`, `owner`, `url`, or `id`.
    pub fn with_stars(mut self, stars: i64) -> Self {
        self.stars = stars;
        self
    }
}

/// Insert shape for a repository snapshot, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTrackedRepository {
    pub name: String,
    pub owner: String,
    pub stars: i64,
    pub url: Url,
}

impl NewTrackedRepository {
    /// Attach the store-assigned id, producing the full record.
    pub fn into_record(self, id: RepositoryId) -> TrackedRepository {
        TrackedRepository {
            id,
            name: self.name,
            owner: self.owner,
            stars: self.stars,
            url: self.url,
        }
    }
}
