//! Infrastructure layer for GitHub Tracker
//!
//! This crate provides implementations for:
//! - Database access (PostgreSQL with sqlx)
//! - The PostgreSQL-backed record store
//! - The GitHub upstream fetcher (reqwest)
//!
//! ## Architecture
//!
//! Concrete implementations of the application layer's port traits live
//! here, so they can be swapped for in-memory doubles in tests.

pub mod database;
pub mod external;
pub mod repositories;

// Re-export commonly used types
pub use database::{DatabaseConfig, DatabasePool, HealthStatus};
pub use external::{GithubClient, GithubConfig, GithubError};
pub use repositories::PgTrackedRepositoryStore;

pub type Result<T> = std::result::Result<T, Error>;

/// Infrastructure-level errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Database errors from sqlx
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}
