//! GitHub Tracker REST API
//!
//! Axum-based HTTP surface over the repository service. Exposes the four
//! CRUD endpoints under `/repositories`, a liveness route, and optional
//! Swagger UI documentation.
//!
//! ## Architecture
//!
//! - **app**: router assembly and tracing setup
//! - **routes**: HTTP route handlers
//! - **extractors**: validated JSON extraction
//! - **responses**: 201/204 response wrappers
//! - **error**: application-error to HTTP status mapping
//! - **state**: injected service and pool handles

#![warn(clippy::all)]

pub mod app;
pub mod config;
pub mod error;
pub mod extractors;
pub mod responses;
pub mod routes;
pub mod state;

// Re-export commonly used types
pub use app::{create_app, init_tracing};
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
