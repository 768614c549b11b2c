//! Router-level tests for the REST API.
//!
//! Drives the assembled router with `tower::ServiceExt::oneshot` against
//! an in-memory record store and a wiremock GitHub upstream.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use github_tracker_api_rest::{app::create_app, config::ApiConfig, state::AppState};
use github_tracker_infrastructure::{GithubClient, GithubConfig};

async fn test_app_with_config(upstream: &MockServer, config: ApiConfig) -> Router {
    let github = GithubClient::new(GithubConfig {
        base_url: upstream.uri(),
        ..Default::default()
    })
    .unwrap();

    create_app(AppState::in_memory(config, Arc::new(github)))
}

async fn test_app(upstream: &MockServer) -> Router {
    let config = ApiConfig {
        enable_swagger: false,
        ..Default::default()
    };
    test_app_with_config(upstream, config).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn put_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn mount_repo(server: &MockServer, owner: &str, name: &str, stars: i64) {
    Mock::given(method("GET"))
        .and(path(format!("/repos/{}/{}", owner, name)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": name,
            "owner": { "login": owner },
            "stargazers_count": stars,
            "html_url": format!("https://github.com/{}/{}", owner, name),
            "description": "extra upstream field"
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_create_repository_returns_201_with_canonical_url() {
    let server = MockServer::start().await;
    mount_repo(&server, "fastapi", "fastapi", 70000).await;
    let app = test_app(&server).await;

    let (status, body) = send(
        &app,
        post_json(
            "/repositories",
            json!({"owner": "fastapi", "repo_name": "fastapi"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["owner"], "fastapi");
    assert_eq!(body["name"], "fastapi");
    assert!(body["stars"].is_i64());
    assert_eq!(body["url"], "https://github.com/fastapi/fastapi");
    assert_eq!(body["id"], 1);
}

#[tokio::test]
async fn test_trailing_slash_forms_resolve() {
    let server = MockServer::start().await;
    mount_repo(&server, "fastapi", "fastapi", 70000).await;
    let app = test_app(&server).await;

    let (status, body) = send(
        &app,
        post_json(
            "/repositories/",
            json!({"owner": "fastapi", "repo_name": "fastapi"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["url"], "https://github.com/fastapi/fastapi");

    // Item routes accept both forms as well.
    let id = body["id"].as_i64().unwrap();
    let (status, _) = send(&app, get(&format!("/repositories/{}/", id))).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, get(&format!("/repositories/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_create_twice_conflicts() {
    let server = MockServer::start().await;
    mount_repo(&server, "fastapi", "fastapi", 70000).await;
    let app = test_app(&server).await;

    let request = json!({"owner": "fastapi", "repo_name": "fastapi"});
    let (status, _) = send(&app, post_json("/repositories", request.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, post_json("/repositories", request)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_create_with_empty_owner_is_rejected_before_fetch() {
    let server = MockServer::start().await;
    // No mock mounted: a request reaching the upstream would 404 and
    // surface as 502, not 400.
    let app = test_app(&server).await;

    let (status, body) = send(
        &app,
        post_json("/repositories", json!({"owner": "", "repo_name": "x"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(server.received_requests().await.unwrap().len(), 0);
}

#[tokio::test]
async fn test_create_surfaces_upstream_failure_as_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/ghost/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;
    let app = test_app(&server).await;

    let (status, body) = send(
        &app,
        post_json(
            "/repositories",
            json!({"owner": "ghost", "repo_name": "missing"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "UPSTREAM_ERROR");
}

#[tokio::test]
async fn test_create_with_partial_upstream_payload_is_mapping_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/broken/repo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "repo",
            "html_url": "https://github.com/broken/repo"
        })))
        .mount(&server)
        .await;
    let app = test_app(&server).await;

    let (status, body) = send(
        &app,
        post_json(
            "/repositories",
            json!({"owner": "broken", "repo_name": "repo"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "UPSTREAM_MAPPING");
}

#[tokio::test]
async fn test_get_unknown_id_returns_404() {
    let server = MockServer::start().await;
    let app = test_app(&server).await;

    let (status, body) = send(&app, get("/repositories/999")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_update_stars_changes_only_stars() {
    let server = MockServer::start().await;
    mount_repo(&server, "tokio-rs", "tokio", 25000).await;
    let app = test_app(&server).await;

    let (_, created) = send(
        &app,
        post_json(
            "/repositories",
            json!({"owner": "tokio-rs", "repo_name": "tokio"}),
        ),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, updated) = send(
        &app,
        put_json(&format!("/repositories/{}", id), json!({"stars": 26000})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["stars"], 26000);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["name"], created["name"]);
    assert_eq!(updated["owner"], created["owner"]);
    assert_eq!(updated["url"], created["url"]);

    // A subsequent read reflects the new value.
    let (status, fetched) = send(&app, get(&format!("/repositories/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["stars"], 26000);
}

#[tokio::test]
async fn test_update_unknown_id_returns_404() {
    let server = MockServer::start().await;
    let app = test_app(&server).await;

    let (status, _) = send(&app, put_json("/repositories/5", json!({"stars": 1}))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_then_get_returns_404() {
    let server = MockServer::start().await;
    mount_repo(&server, "fastapi", "fastapi", 70000).await;
    let app = test_app(&server).await;

    let (_, created) = send(
        &app,
        post_json(
            "/repositories",
            json!({"owner": "fastapi", "repo_name": "fastapi"}),
        ),
    )
    .await;
    let uri = format!("/repositories/{}", created["id"].as_i64().unwrap());

    let (status, body) = send(&app, delete(&uri)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, delete(&uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cors_allow_list_honors_configured_origins() {
    let server = MockServer::start().await;
    let config = ApiConfig {
        enable_swagger: false,
        cors_allowed_origins: vec!["https://tracker.example".to_string()],
        ..Default::default()
    };
    let app = test_app_with_config(&server, config).await;

    let allowed = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "https://tracker.example")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(allowed).await.unwrap();
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|v| v.to_str().unwrap()),
        Some("https://tracker.example")
    );

    let denied = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "https://elsewhere.example")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(denied).await.unwrap();
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn test_wildcard_cors_allows_any_origin() {
    let server = MockServer::start().await;
    let app = test_app(&server).await;

    let request = Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "https://anywhere.example")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|v| v.to_str().unwrap()),
        Some("*")
    );
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = MockServer::start().await;
    let app = test_app(&server).await;

    let (status, body) = send(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}
