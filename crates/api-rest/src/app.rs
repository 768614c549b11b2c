//! Application builder and tracing setup.
//!
//! Assembles routes, middleware, and state into an Axum router.

use crate::{config::ApiConfig, routes, state::AppState};
use axum::{http::HeaderValue, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::warn;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create the main application router
pub fn create_app(state: AppState) -> Router {
    let config = state.config.clone();

    let mut app = Router::new()
        .merge(routes::health_routes())
        .merge(routes::repository_routes())
        .with_state(state);

    if config.enable_swagger {
        app = app.merge(swagger_ui());
    }

    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(build_cors_layer(&config))
            .layer(TimeoutLayer::new(config.request_timeout())),
    )
}

/// Initialize tracing/logging
pub fn init_tracing(config: &ApiConfig) -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    Ok(())
}

/// Build CORS layer from configuration
fn build_cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.cors_allowed_origins.contains(&"*".to_string()) {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(%origin, "Ignoring unparseable CORS origin");
                    None
                }
            })
            .collect();
        cors.allow_origin(AllowOrigin::list(origins))
    }
}

/// Create Swagger UI routes
fn swagger_ui() -> SwaggerUi {
    #[derive(OpenApi)]
    #[openapi(
        info(
            title = "GitHub Tracker API",
            version = "0.1.0",
            description = "Track GitHub repositories and snapshots of their metadata",
            license(name = "MIT"),
        ),
        paths(
            crate::routes::health::health,
            crate::routes::repositories::create_repository,
            crate::routes::repositories::read_repository,
            crate::routes::repositories::update_repository,
            crate::routes::repositories::delete_repository,
        ),
        components(schemas(
            crate::routes::health::HealthResponse,
            crate::routes::repositories::CreateRepositoryRequest,
            crate::routes::repositories::UpdateStarsRequest,
            crate::routes::repositories::RepositoryResponse,
        )),
        tags(
            (name = "health", description = "Health check endpoints"),
            (name = "repositories", description = "Tracked repository management"),
        )
    )]
    struct ApiDoc;

    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
