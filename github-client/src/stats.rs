//! Derived GitHub statistics for the portfolio page.
//!
//! The profile and the repository list are fetched independently, so each
//! arrives as a [`FetchState`]. [`aggregate`] combines whatever is available
//! without fetching anything itself.

use serde::Serialize;

use crate::models::{GitHubRepoSummary, GitHubUserSummary};

/// Maximum number of featured projects.
pub const FEATURED_LIMIT: usize = 6;

/// Outcome of one independent fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState<T> {
    Loading,
    Loaded(T),
    /// Carries a message fit for display, not the raw upstream error.
    Failed(String),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            FetchState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Maps a fetch result, replacing any error with `failure_message`.
    pub fn from_result<E>(result: Result<T, E>, failure_message: &str) -> Self {
        match result {
            Ok(value) => FetchState::Loaded(value),
            Err(_) => FetchState::Failed(failure_message.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GitHubStats {
    pub repo_count: u64,
    pub total_stars: u64,
    pub total_forks: u64,
    pub follower_count: u64,
}

/// Combined view over the two fetches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GitHubStatsView {
    pub stats: GitHubStats,
    pub featured_projects: Vec<GitHubRepoSummary>,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Folds a profile and a repository list into counters and featured projects.
///
/// Counters default to 0 for anything not loaded. Featured projects are the
/// repositories with at least one star or fork, in upstream order, capped at
/// [`FEATURED_LIMIT`]. The profile's error wins when both fetches failed.
pub fn aggregate(
    user: &FetchState<GitHubUserSummary>,
    repos: &FetchState<Vec<GitHubRepoSummary>>,
) -> GitHubStatsView {
    let repo_list = repos.loaded().map(Vec::as_slice).unwrap_or_default();
    let profile = user.loaded();

    let stats = GitHubStats {
        repo_count: profile.map_or(0, |u| u.public_repo_count),
        total_stars: repo_list.iter().map(|r| r.star_count).sum(),
        total_forks: repo_list.iter().map(|r| r.fork_count).sum(),
        follower_count: profile.map_or(0, |u| u.follower_count),
    };

    let featured_projects = repo_list
        .iter()
        .filter(|r| r.star_count > 0 || r.fork_count > 0)
        .take(FEATURED_LIMIT)
        .cloned()
        .collect();

    GitHubStatsView {
        stats,
        featured_projects,
        is_loading: user.is_loading() || repos.is_loading(),
        error: user.error().or_else(|| repos.error()).map(str::to_string),
    }
}
