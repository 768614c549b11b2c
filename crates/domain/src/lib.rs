//! Domain types for GitHub Tracker
//!
//! This crate defines the core entity of the system: a persisted snapshot
//! of one GitHub repository's metadata, keyed by a store-assigned
//! surrogate identifier.

pub mod identifiers;
pub mod repository;

pub use identifiers::RepositoryId;
pub use repository::{NewTrackedRepository, TrackedRepository};
