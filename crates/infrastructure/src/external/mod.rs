//! Upstream service clients.
//!
//! The GitHub metadata API is the only upstream this system consumes.
//! The client performs one outbound call per invocation with a fixed
//! timeout; failures surface to the caller without retry or backoff.

pub mod github;

pub use github::{GithubClient, GithubConfig};

use thiserror::Error;

/// Errors from upstream fetch operations
#[derive(Error, Debug, Clone)]
pub enum GithubError {
    /// Upstream returned a non-success HTTP status
    #[error("GitHub API returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Request never completed (connect failure, timeout, protocol error)
    #[error("GitHub request failed: {0}")]
    Transport(String),
}

impl GithubError {
    /// Check if this error is retryable by a caller that chooses to retry
    /// (this system never does).
    pub fn is_retryable(&self) -> bool {
        match self {
            GithubError::Transport(_) => true,
            GithubError::Status { status, .. } => *status >= 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_retryable() {
        let transport = GithubError::Transport("connection refused".to_string());
        assert!(transport.is_retryable());

        let not_found = GithubError::Status {
            status: 404,
            body: "Not Found".to_string(),
        };
        assert!(!not_found.is_retryable());

        let server_err = GithubError::Status {
            status: 502,
            body: "Bad Gateway".to_string(),
        };
        assert!(server_err.is_retryable());
    }
}
