//! HTTP route handlers.

pub mod health;
pub mod repositories;

// Re-export for convenience
pub use health::routes as health_routes;
pub use repositories::routes as repository_routes;
