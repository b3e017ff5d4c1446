//! Upstream query parameters and the typed summaries read from GitHub responses.
//!
//! Summaries deserialize from GitHub's snake_case field names and serialize
//! with the camelCase names the site uses.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// GitHub caps `per_page` at 100.
pub const MAX_PER_PAGE: u32 = 100;

/// Sort order accepted by `GET /users/{username}/repos`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepoSort {
    Created,
    #[default]
    Updated,
    Pushed,
    FullName,
}

impl RepoSort {
    pub fn as_str(self) -> &'static str {
        match self {
            RepoSort::Created => "created",
            RepoSort::Updated => "updated",
            RepoSort::Pushed => "pushed",
            RepoSort::FullName => "full_name",
        }
    }
}

impl fmt::Display for RepoSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RepoSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(RepoSort::Created),
            "updated" => Ok(RepoSort::Updated),
            "pushed" => Ok(RepoSort::Pushed),
            "full_name" => Ok(RepoSort::FullName),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

/// Parameters for the repository list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepoQuery {
    pub sort: RepoSort,
    per_page: u32,
}

impl RepoQuery {
    /// `per_page` is clamped to `1..=MAX_PER_PAGE`.
    pub fn new(sort: RepoSort, per_page: u32) -> Self {
        Self {
            sort,
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }
}

impl Default for RepoQuery {
    fn default() -> Self {
        Self::new(RepoSort::default(), MAX_PER_PAGE)
    }
}

/// Profile counters read from `GET /users/{username}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubUserSummary {
    #[serde(rename(serialize = "publicRepoCount", deserialize = "public_repos"))]
    pub public_repo_count: u64,
    #[serde(rename(serialize = "followerCount", deserialize = "followers"))]
    pub follower_count: u64,
    #[serde(rename(serialize = "followingCount", deserialize = "following"))]
    pub following_count: u64,
    #[serde(rename(serialize = "createdAt", deserialize = "created_at"))]
    pub created_at: DateTime<Utc>,
}

/// One entry of `GET /users/{username}/repos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubRepoSummary {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename(serialize = "url", deserialize = "html_url"))]
    pub url: String,
    #[serde(default, rename(serialize = "primaryLanguage", deserialize = "language"))]
    pub primary_language: Option<String>,
    #[serde(rename(serialize = "starCount", deserialize = "stargazers_count"))]
    pub star_count: u64,
    #[serde(rename(serialize = "forkCount", deserialize = "forks_count"))]
    pub fork_count: u64,
    #[serde(rename(serialize = "updatedAt", deserialize = "updated_at"))]
    pub updated_at: DateTime<Utc>,
}
