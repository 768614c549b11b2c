//! GitHub Tracker API server binary.

use std::sync::Arc;

use anyhow::Context;
use github_tracker_api_rest::{app, config::ApiConfig, state::AppState};
use github_tracker_application::RepositoryService;
use github_tracker_infrastructure::{
    DatabaseConfig, DatabasePool, GithubClient, GithubConfig, PgTrackedRepositoryStore,
};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::from_env();
    app::init_tracing(&config)?;

    // Fail fast on a missing or non-PostgreSQL DATABASE_URL.
    let db_config = DatabaseConfig::from_env().context("invalid database configuration")?;
    let pool = DatabasePool::new(&db_config)
        .await
        .context("failed to connect to database")?;
    pool.ensure_schema()
        .await
        .context("failed to create schema")?;

    let github = GithubClient::new(GithubConfig::from_env())
        .context("failed to build GitHub client")?;

    let store = Arc::new(PgTrackedRepositoryStore::new(pool.pool().clone()));
    let service = RepositoryService::new(store, Arc::new(github));
    let state = AppState::new(config.clone(), service, pool.clone());

    let router = app::create_app(state);
    let addr = config.server_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!(%addr, "GitHub Tracker API listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    pool.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
    }
}
