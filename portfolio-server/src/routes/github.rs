//! GitHub proxy routes.
//!
//! Profile and repository bodies are relayed as-is. Upstream failures become
//! a generic 500; the upstream status and body only reach the log.

use axum::extract::{Path, Query, State};
use axum::Json;
use github_client::stats::{aggregate, FetchState, GitHubStatsView};
use github_client::{RepoQuery, RepoSort, MAX_PER_PAGE};
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, warn};

use crate::error::{AppError, GitHubResource};
use crate::state::AppState;

/// Raw `sort` / `per_page` query parameters.
///
/// Kept as strings so a bad value falls back to the default instead of
/// rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct RepoParams {
    pub sort: Option<String>,
    pub per_page: Option<String>,
}

impl RepoParams {
    pub fn to_query(&self) -> RepoQuery {
        let sort = match self.sort.as_deref().map(str::trim) {
            None | Some("") => RepoSort::default(),
            Some(raw) => raw.parse::<RepoSort>().unwrap_or_else(|e| {
                warn!(sort = raw, error = %e, "Unknown sort, using default");
                RepoSort::default()
            }),
        };
        let per_page = match self.per_page.as_deref().map(str::trim) {
            None | Some("") => MAX_PER_PAGE,
            Some(raw) => raw.parse::<u32>().unwrap_or_else(|e| {
                warn!(per_page = raw, error = %e, "Invalid per_page, using default");
                MAX_PER_PAGE
            }),
        };
        RepoQuery::new(sort, per_page)
    }
}

/// `GET /api/github/{username}`
pub async fn github_user_handler(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Value>, AppError> {
    let body = state
        .github
        .get_user(&username)
        .await
        .map_err(AppError::github(GitHubResource::User))?;
    Ok(Json(body))
}

/// `GET /api/github/{username}/repos?sort=&per_page=`
pub async fn github_repos_handler(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(params): Query<RepoParams>,
) -> Result<Json<Value>, AppError> {
    let body = state
        .github
        .get_repos(&username, &params.to_query())
        .await
        .map_err(AppError::github(GitHubResource::Repos))?;
    Ok(Json(body))
}

/// `GET /api/github/{username}/stats`
///
/// Fetches profile and repositories concurrently and always answers 200; a
/// failed fetch shows up in the view's `error` field.
pub async fn github_stats_handler(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(params): Query<RepoParams>,
) -> Json<GitHubStatsView> {
    let query = params.to_query();
    let (user, repos) = tokio::join!(
        state.github.get_user_summary(&username),
        state.github.get_repo_summaries(&username, &query),
    );

    if let Err(e) = &user {
        error!(resource = %GitHubResource::User, error = %e, "GitHub stats fetch failed");
    }
    if let Err(e) = &repos {
        error!(resource = %GitHubResource::Repos, error = %e, "GitHub stats fetch failed");
    }

    let user = FetchState::from_result(user, GitHubResource::User.failure_message());
    let repos = FetchState::from_result(repos, GitHubResource::Repos.failure_message());

    Json(aggregate(&user, &repos))
}
