//! Strongly-typed identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Surrogate key for a tracked repository.
///
/// Assigned by the store (`BIGSERIAL`), immutable once issued, and never
/// reused for another record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepositoryId(i64);

impl RepositoryId {
    /// Wrap a raw key returned by the store.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw integer value, for binding into queries.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for RepositoryId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
