//! Contact repository: SQLite persistence for contact messages.
//!
//! Uses SqlitePoolManager and ContactMessage. Ids come from an
//! `AUTOINCREMENT` column, so SQLite's single writer serializes id assignment
//! across concurrent inserts and never reuses an id.

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use crate::error::StorageError;
use crate::models::{ContactMessage, NewContactMessage};
use crate::repository::ContactStore;
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct SqliteContactRepository {
    pool_manager: SqlitePoolManager,
}

impl SqliteContactRepository {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), sqlx::Error> {
        info!("Creating contact_messages table if not exist");

        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS contact_messages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                subject TEXT NOT NULL,
                message TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        info!("Database tables created successfully");
        Ok(())
    }
}

#[async_trait]
impl ContactStore for SqliteContactRepository {
    async fn create(&self, data: NewContactMessage) -> Result<ContactMessage, StorageError> {
        let pool = self.pool_manager.pool();

        let message = sqlx::query_as::<_, ContactMessage>(
            r#"
            INSERT INTO contact_messages (name, email, subject, message, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, name, email, subject, message, created_at
            "#,
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.subject)
        .bind(&data.message)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;

        info!(id = message.id, email = %message.email, "Saved contact message");
        Ok(message)
    }

    async fn get(&self, id: i64) -> Result<Option<ContactMessage>, StorageError> {
        let pool = self.pool_manager.pool();

        let message = sqlx::query_as::<_, ContactMessage>(
            "SELECT id, name, email, subject, message, created_at FROM contact_messages WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(message)
    }

    async fn list_all(&self) -> Result<Vec<ContactMessage>, StorageError> {
        let pool = self.pool_manager.pool();

        let messages: Vec<ContactMessage> = sqlx::query_as::<_, ContactMessage>(
            "SELECT id, name, email, subject, message, created_at FROM contact_messages ORDER BY id ASC",
        )
        .fetch_all(pool)
        .await?;

        info!("Retrieved {} contact messages", messages.len());
        Ok(messages)
    }

    async fn count(&self) -> Result<u64, StorageError> {
        let pool = self.pool_manager.pool();

        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM contact_messages")
            .fetch_one(pool)
            .await?;

        Ok(total.0.max(0) as u64)
    }
}
