//! Application layer for GitHub Tracker
//!
//! This crate orchestrates domain logic between the upstream fetcher and
//! the record store, and owns the error taxonomy that the API layer maps
//! to HTTP status codes.
//!
//! ## Modules
//!
//! - `services` - The `RepositoryService` and its port traits

pub mod services;

// Re-export commonly used types
pub use services::{
    GithubRepoPayload, NewTrackedRepository, RepoFetcher, RepositoryService,
    TrackedRepositoryStore,
};

use thiserror::Error;

/// Application-level errors
///
/// Every failure a service operation can produce. The API layer relies on
/// `http_status` and `error_code` to build client-visible responses.
#[derive(Error, Debug, Clone)]
pub enum ApplicationError {
    /// No record for the given id
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Duplicate record (unique `url` constraint)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Upstream fetch failed or returned a non-success status
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Upstream payload missing an expected field
    #[error("Upstream payload mapping failed: {0}")]
    Mapping(String),

    /// Store unreachable or failing
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Get HTTP status code for this error
    pub fn http_status(&self) -> u16 {
        match self {
            ApplicationError::NotFound(_) => 404,
            ApplicationError::Conflict(_) => 409,
            ApplicationError::InvalidInput(_) => 400,
            ApplicationError::Upstream(_) => 502,
            ApplicationError::Mapping(_) => 400,
            ApplicationError::ServiceUnavailable(_) => 503,
            ApplicationError::Internal(_) => 500,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            ApplicationError::NotFound(_) => "NOT_FOUND",
            ApplicationError::Conflict(_) => "CONFLICT",
            ApplicationError::InvalidInput(_) => "INVALID_INPUT",
            ApplicationError::Upstream(_) => "UPSTREAM_ERROR",
            ApplicationError::Mapping(_) => "UPSTREAM_MAPPING",
            ApplicationError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            ApplicationError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApplicationError::Upstream(_) | ApplicationError::ServiceUnavailable(_)
        )
    }
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;
