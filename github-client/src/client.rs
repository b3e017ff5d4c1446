//! HTTP client for the GitHub REST API.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::GitHubError;
use crate::models::{GitHubRepoSummary, GitHubUserSummary, RepoQuery};

pub const GITHUB_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const USER_AGENT: &str = concat!("portfolio-server/", env!("CARGO_PKG_VERSION"));
const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const LOG_PREVIEW_LEN: usize = 200;

/// GitHub API client. Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: Url,
}

impl GitHubClient {
    /// Creates a client for `base_url` (normally [`GITHUB_API_BASE`]).
    ///
    /// Every request is bounded by `timeout`. A `token`, when given, is sent
    /// as a bearer token to raise GitHub's anonymous rate limit.
    pub fn new(base_url: &str, timeout: Duration, token: Option<&str>) -> Result<Self, GitHubError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| GitHubError::Config(format!("invalid base URL {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(GitHubError::Config(format!("base URL cannot be a base: {base_url}")));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| GitHubError::Config(format!("invalid token: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| GitHubError::Config(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// Fetches `GET /users/{username}` and returns the body unmodified,
    /// object keys in upstream order.
    pub async fn get_user(&self, username: &str) -> Result<Value, GitHubError> {
        let username = validate_username(username)?;
        let url = self.endpoint(&["users", username])?;
        info!(username, "step: GitHub user request");
        self.fetch_json(url).await
    }

    /// Fetches `GET /users/{username}/repos` and returns the body unmodified.
    pub async fn get_repos(&self, username: &str, query: &RepoQuery) -> Result<Value, GitHubError> {
        let username = validate_username(username)?;
        let mut url = self.endpoint(&["users", username, "repos"])?;
        url.query_pairs_mut()
            .append_pair("sort", query.sort.as_str())
            .append_pair("per_page", &query.per_page().to_string());
        info!(
            username,
            sort = %query.sort,
            per_page = query.per_page(),
            "step: GitHub repos request"
        );
        self.fetch_json(url).await
    }

    /// Typed variant of [`Self::get_user`].
    pub async fn get_user_summary(&self, username: &str) -> Result<GitHubUserSummary, GitHubError> {
        let body = self.get_user(username).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Typed variant of [`Self::get_repos`].
    pub async fn get_repo_summaries(
        &self,
        username: &str,
        query: &RepoQuery,
    ) -> Result<Vec<GitHubRepoSummary>, GitHubError> {
        let body = self.get_repos(username, query).await?;
        Ok(serde_json::from_value(body)?)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, GitHubError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GitHubError::Config(format!("base URL cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn fetch_json(&self, url: Url) -> Result<Value, GitHubError> {
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body: String = body.chars().take(LOG_PREVIEW_LEN).collect();
            warn!(status = status.as_u16(), url = %url, "GitHub API returned non-success status");
            return Err(GitHubError::Status {
                status: status.as_u16(),
                url: url.to_string(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let body: Value = serde_json::from_slice(&bytes)?;

        info!(url = %url, bytes = bytes.len(), "step: GitHub request done");
        Ok(body)
    }
}

fn validate_username(username: &str) -> Result<&str, GitHubError> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(GitHubError::InvalidUsername(username.to_string()));
    }
    Ok(trimmed)
}
