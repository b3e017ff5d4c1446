//! Errors returned by [`crate::GitHubClient`].

use thiserror::Error;

/// Failure of a single upstream GitHub call.
///
/// The `Display` output may contain upstream details and is meant for logs
/// only, never for HTTP responses.
#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("Invalid username: {0:?}")]
    InvalidUsername(String),

    #[error("Client configuration error: {0}")]
    Config(String),

    #[error("GitHub API error ({status}) for {url}: {body}")]
    Status { status: u16, url: String, body: String },

    #[error("GitHub request timed out: {0}")]
    Timeout(String),

    #[error("GitHub request failed: {0}")]
    Request(String),

    #[error("Invalid GitHub response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for GitHubError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GitHubError::Timeout(err.to_string())
        } else {
            GitHubError::Request(err.to_string())
        }
    }
}

impl GitHubError {
    /// Upstream HTTP status, when the upstream answered at all.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            GitHubError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
