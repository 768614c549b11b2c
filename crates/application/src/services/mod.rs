//! Application services
//!
//! Business logic orchestration between the upstream fetcher and the
//! record store.

mod repository;

pub use repository::*;
