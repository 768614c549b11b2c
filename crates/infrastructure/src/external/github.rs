//! GitHub API client.
//!
//! Fetches repository metadata from `GET /repos/{owner}/{repo}`. The
//! response body is returned as parsed JSON, untouched; field
//! extraction and validation belong to the service layer.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::GithubError;
use async_trait::async_trait;
use github_tracker_application::{ApplicationError, ApplicationResult, RepoFetcher};

/// Configuration for the GitHub API connection
#[derive(Debug, Clone)]
pub struct GithubConfig {
    /// Base URL for the GitHub API
    pub base_url: String,
    /// Request timeout, applied to the whole fetch
    pub timeout: Duration,
    /// User agent sent with every request (GitHub rejects requests without one)
    pub user_agent: String,
    /// Optional bearer token; anonymous access works but is rate-limited harder
    pub token: Option<String>,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.github.com".to_string(),
            timeout: Duration::from_secs(5),
            user_agent: "github-tracker/0.1".to_string(),
            token: None,
        }
    }
}

impl GithubConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base_url) = std::env::var("GITHUB_API_BASE_URL") {
            config.base_url = base_url;
        }
        if let Ok(token) = std::env::var("GITHUB_TOKEN") {
            if !token.is_empty() {
                config.token = Some(token);
            }
        }
        config
    }
}

/// Client for the GitHub repository metadata API.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    base_url: String,
}

impl GithubClient {
    /// Create a new client from the given configuration.
    pub fn new(config: GithubConfig) -> crate::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static("github-tracker")),
        );
        if let Some(ref token) = config.token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
                    crate::Error::Configuration("GITHUB_TOKEN is not a valid header value".to_string())
                })?,
            );
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| {
                crate::Error::Configuration(format!("failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client with default configuration.
    pub fn with_defaults() -> crate::Result<Self> {
        Self::new(GithubConfig::default())
    }

    /// Fetch raw metadata for one repository.
    ///
    /// One outbound GET per call; any non-success status fails with the
    /// upstream status and body attached. The caller does not retry.
    #[instrument(skip(self))]
    pub async fn fetch(&self, owner: &str, repo: &str) -> Result<serde_json::Value, GithubError> {
        let url = format!("{}/repos/{}/{}", self.base_url, owner, repo);
        debug!(%url, "Fetching repository metadata");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| GithubError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "GitHub returned non-success status");
            return Err(GithubError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| GithubError::Transport(format!("invalid JSON body: {}", e)))
    }
}

#[async_trait]
impl RepoFetcher for GithubClient {
    async fn fetch_repo(&self, owner: &str, repo: &str) -> ApplicationResult<serde_json::Value> {
        self.fetch(owner, repo)
            .await
            .map_err(|e| ApplicationError::Upstream(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: String, timeout: Duration) -> GithubClient {
        GithubClient::new(GithubConfig {
            base_url,
            timeout,
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_returns_body_untouched() {
        let server = MockServer::start().await;
        let payload = json!({
            "name": "fastapi",
            "owner": { "login": "fastapi" },
            "stargazers_count": 70000,
            "html_url": "https://github.com/fastapi/fastapi",
            "forks_count": 5900
        });

        Mock::given(method("GET"))
            .and(path("/repos/fastapi/fastapi"))
            .and(header_exists("user-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
            .mount(&server)
            .await;

        let client = test_client(server.uri(), Duration::from_secs(5));
        let body = client.fetch("fastapi", "fastapi").await.unwrap();

        // Pass-through: extra fields survive, nothing is stripped.
        assert_eq!(body, payload);
    }

    #[tokio::test]
    async fn test_fetch_surfaces_upstream_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/ghost/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
            .mount(&server)
            .await;

        let client = test_client(server.uri(), Duration::from_secs(5));
        let err = client.fetch("ghost", "missing").await.unwrap_err();

        match err {
            GithubError::Status { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, "Not Found");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/slow/repo"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client = test_client(server.uri(), Duration::from_millis(100));
        let err = client.fetch("slow", "repo").await.unwrap_err();

        assert!(matches!(err, GithubError::Transport(_)));
    }
}
