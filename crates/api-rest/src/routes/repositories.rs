//! Tracked repository endpoints.

use crate::{
    error::ApiResult,
    extractors::ValidatedJson,
    responses::{Created, NoContent},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use github_tracker_domain::{RepositoryId, TrackedRepository};
use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::ToSchema;
use validator::Validate;

/// Track repository request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRepositoryRequest {
    #[validate(length(min = 1))]
    pub owner: String,

    #[validate(length(min = 1))]
    pub repo_name: String,
}

/// Update star count request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStarsRequest {
    pub stars: i64,
}

/// Tracked repository response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RepositoryResponse {
    pub id: i64,
    pub name: String,
    pub owner: String,
    pub stars: i64,
    #[schema(value_type = String)]
    pub url: Url,
}

impl From<TrackedRepository> for RepositoryResponse {
    fn from(record: TrackedRepository) -> Self {
        Self {
            id: record.id.as_i64(),
            name: record.name,
            owner: record.owner,
            stars: record.stars,
            url: record.url,
        }
    }
}

/// Repository routes
///
/// Each endpoint is registered with and without a trailing slash;
/// clients split on which form they send and both must resolve.
pub fn routes() -> Router<AppState> {
    let item = get(read_repository)
        .put(update_repository)
        .delete(delete_repository);

    Router::new()
        .route("/repositories", post(create_repository))
        .route("/repositories/", post(create_repository))
        .route("/repositories/:id", item.clone())
        .route("/repositories/:id/", item)
}

/// Track a repository
///
/// Fetches metadata for `owner/repo_name` from GitHub and persists a
/// snapshot of it.
#[utoipa::path(
    post,
    path = "/repositories",
    tag = "repositories",
    request_body = CreateRepositoryRequest,
    responses(
        (status = 201, description = "Repository tracked", body = RepositoryResponse),
        (status = 400, description = "Invalid request or unmappable upstream payload"),
        (status = 409, description = "Repository URL already tracked"),
        (status = 502, description = "Upstream fetch failed"),
    )
)]
pub(crate) async fn create_repository(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateRepositoryRequest>,
) -> ApiResult<Created<RepositoryResponse>> {
    let record = state.repositories.track(&req.owner, &req.repo_name).await?;
    Ok(Created(record.into()))
}

/// Get a tracked repository
#[utoipa::path(
    get,
    path = "/repositories/{id}",
    tag = "repositories",
    params(
        ("id" = i64, Path, description = "Repository record id"),
    ),
    responses(
        (status = 200, description = "Repository record", body = RepositoryResponse),
        (status = 404, description = "Repository not found"),
    )
)]
pub(crate) async fn read_repository(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<RepositoryResponse>> {
    let record = state.repositories.get(RepositoryId::new(id)).await?;
    Ok(Json(record.into()))
}

/// Update a repository's star count
///
/// Overwrites `stars` with the supplied value; no other field is mutable.
#[utoipa::path(
    put,
    path = "/repositories/{id}",
    tag = "repositories",
    params(
        ("id" = i64, Path, description = "Repository record id"),
    ),
    request_body = UpdateStarsRequest,
    responses(
        (status = 200, description = "Updated repository record", body = RepositoryResponse),
        (status = 404, description = "Repository not found"),
    )
)]
pub(crate) async fn update_repository(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(req): ValidatedJson<UpdateStarsRequest>,
) -> ApiResult<Json<RepositoryResponse>> {
    let record = state
        .repositories
        .update_stars(RepositoryId::new(id), req.stars)
        .await?;
    Ok(Json(record.into()))
}

/// Stop tracking a repository
#[utoipa::path(
    delete,
    path = "/repositories/{id}",
    tag = "repositories",
    params(
        ("id" = i64, Path, description = "Repository record id"),
    ),
    responses(
        (status = 204, description = "Repository deleted"),
        (status = 404, description = "Repository not found"),
    )
)]
pub(crate) async fn delete_repository(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<NoContent> {
    state.repositories.untrack(RepositoryId::new(id)).await?;
    Ok(NoContent)
}
