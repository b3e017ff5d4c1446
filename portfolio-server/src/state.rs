use std::sync::Arc;

use anyhow::Context;
use github_client::GitHubClient;
use storage::{ContactStore, InMemoryContactStore, SqliteContactRepository};
use tracing::{info, warn};

use crate::config::{AppConfig, StoreKind};

/// Shared handler state. Cloned per request; the store and client are shared.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ContactStore>,
    pub github: GitHubClient,
}

impl AppState {
    pub fn new(store: Arc<dyn ContactStore>, github: GitHubClient) -> Self {
        Self { store, github }
    }

    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let store = build_store(config).await?;
        let github = GitHubClient::new(
            &config.github_api_url,
            config.github_timeout(),
            config.github_token.as_deref(),
        )
        .context("Failed to create GitHub client")?;

        Ok(Self::new(store, github))
    }
}

/// Opens the contact store selected by `CONTACT_STORE`.
pub async fn build_store(config: &AppConfig) -> anyhow::Result<Arc<dyn ContactStore>> {
    match config.store_kind {
        StoreKind::Sqlite => {
            info!(database_url = %config.database_url, "Using SQLite contact store");
            let repo = SqliteContactRepository::new(&config.database_url)
                .await
                .with_context(|| format!("Failed to open contact store at {}", config.database_url))?;
            Ok(Arc::new(repo))
        }
        StoreKind::Memory => {
            warn!("Using in-memory contact store; messages are lost on restart");
            Ok(Arc::new(InMemoryContactStore::new()))
        }
    }
}
