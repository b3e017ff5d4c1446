//! # GitHub client
//!
//! Read-only access to the public GitHub REST API on behalf of the portfolio
//! site, plus the statistics derived from it.
//!
//! ## GitHubClient
//!
//! Issues the two upstream queries the site needs:
//! - `GET /users/{username}` (profile)
//! - `GET /users/{username}/repos?sort=&per_page=` (repository list)
//!
//! Bodies are returned as raw [`serde_json::Value`] so the server can relay
//! them unmodified. No caching and no retries: one failed upstream call is one
//! [`GitHubError`].
//!
//! ## Stats
//!
//! [`stats::aggregate`] folds a profile and a repository list, each of which
//! may still be loading or may have failed, into counters and a featured
//! project list.
//!
//! ## Example
//!
//! ```rust,no_run
//! use github_client::{GitHubClient, RepoQuery};
//! use std::time::Duration;
//!
//! async fn example() -> Result<(), github_client::GitHubError> {
//!     let client = GitHubClient::new("https://api.github.com", Duration::from_secs(5), None)?;
//!     let user = client.get_user("octocat").await?;
//!     let repos = client.get_repos("octocat", &RepoQuery::default()).await?;
//!     println!("{} / {}", user["login"], repos.as_array().map_or(0, |r| r.len()));
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod models;
pub mod stats;

pub use client::{GitHubClient, DEFAULT_TIMEOUT, GITHUB_API_BASE};
pub use error::GitHubError;
pub use models::{GitHubRepoSummary, GitHubUserSummary, RepoQuery, RepoSort, MAX_PER_PAGE};
pub use reqwest::Url;
