//! Server configuration: listener, contact store, GitHub upstream, logging. Loaded from env.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};


pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://./portfolio.db";
pub const DEFAULT_LOG_FILE: &str = "logs/portfolio.log";
pub const DEFAULT_GITHUB_TIMEOUT_SECS: u64 = 5;

/// Which [`storage::ContactStore`] backs the contact endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreKind {
    #[default]
    Sqlite,
    Memory,
}

impl FromStr for StoreKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(StoreKind::Sqlite),
            "memory" => Ok(StoreKind::Memory),
            other => anyhow::bail!("CONTACT_STORE must be 'sqlite' or 'memory', got '{}'", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HOST
    pub host: String,
    /// PORT
    pub port: u16,
    /// DATABASE_URL, used when the store is SQLite
    pub database_url: String,
    /// CONTACT_STORE
    pub store_kind: StoreKind,
    /// GITHUB_API_URL
    pub github_api_url: String,
    /// GITHUB_TOKEN; anonymous requests when unset
    pub github_token: Option<String>,
    /// GITHUB_TIMEOUT_SECS, upper bound for each upstream call
    pub github_timeout_secs: u64,
    /// LOG_FILE; set it empty to log to the console only
    pub log_file: Option<String>,
    /// STATIC_DIR, pre-built site served for non-API paths
    pub static_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load from environment variables. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn load() -> Result<Self> {
        let host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = parse_var("PORT", DEFAULT_PORT)?;
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let store_kind = match env::var("CONTACT_STORE") {
            Ok(raw) => raw.parse()?,
            Err(_) => StoreKind::default(),
        };
        let github_api_url = env::var("GITHUB_API_URL")
            .unwrap_or_else(|_| github_client::GITHUB_API_BASE.to_string());
        let github_token = env::var("GITHUB_TOKEN").ok().filter(|t| !t.trim().is_empty());
        let github_timeout_secs = parse_var("GITHUB_TIMEOUT_SECS", DEFAULT_GITHUB_TIMEOUT_SECS)?;
        let log_file = match env::var("LOG_FILE") {
            Ok(path) if path.trim().is_empty() => None,
            Ok(path) => Some(path),
            Err(_) => Some(DEFAULT_LOG_FILE.to_string()),
        };
        let static_dir = env::var("STATIC_DIR")
            .ok()
            .filter(|d| !d.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            host,
            port,
            database_url,
            store_kind,
            github_api_url,
            github_token,
            github_timeout_secs,
            log_file,
            static_dir,
        })
    }

    /// Validate config (GitHub URL must parse, timeout must be positive).
    pub fn validate(&self) -> Result<()> {
        let url = parse_url(&self.github_api_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("GITHUB_API_URL must be http(s): {}", self.github_api_url);
        }
        if self.github_timeout_secs == 0 {
            anyhow::bail!("GITHUB_TIMEOUT_SECS must be greater than 0");
        }
        if self.store_kind == StoreKind::Sqlite && self.database_url.trim().is_empty() {
            anyhow::bail!("DATABASE_URL must be set when CONTACT_STORE is sqlite");
        }
        Ok(())
    }

    pub fn github_timeout(&self) -> Duration {
        Duration::from_secs(self.github_timeout_secs)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_url(raw: &str) -> Result<github_client::Url> {
    github_client::Url::parse(raw).with_context(|| format!("GITHUB_API_URL is not a valid URL: {raw}"))
}

fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {key} value: {raw}")),
        Err(_) => Ok(default),
    }
}
