//! Record store implementations.
//!
//! PostgreSQL-backed implementation of the store port defined in the
//! application layer.

mod tracked_repository;

pub use tracked_repository::*;
