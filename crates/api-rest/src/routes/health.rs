//! Health check endpoint.

use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
}

/// Health routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// Liveness check
///
/// Reports process liveness and, when a database pool is attached, the
/// result of a round-trip to it.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub(crate) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match &state.db {
        Some(pool) => {
            let status = pool.health_check().await;
            Some(if status.healthy {
                "healthy".to_string()
            } else {
                status.error.unwrap_or_else(|| "unhealthy".to_string())
            })
        }
        None => None,
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        database,
    })
}
