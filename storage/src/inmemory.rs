//! In-memory contact store for development and tests.
//!
//! Data is lost on restart. The next id is advanced and the record pushed
//! under the same write lock, so concurrent creates get distinct ids.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use crate::error::StorageError;
use crate::models::{ContactMessage, NewContactMessage};
use crate::repository::ContactStore;

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    messages: Vec<ContactMessage>,
}

/// In-memory contact store. Cloning shares the underlying records.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContactStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryContactStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContactStore for InMemoryContactStore {
    async fn create(&self, data: NewContactMessage) -> Result<ContactMessage, StorageError> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let message = data.into_record(inner.next_id);
        inner.messages.push(message.clone());
        drop(inner);

        info!(id = message.id, email = %message.email, "Saved contact message in memory");
        Ok(message)
    }

    async fn get(&self, id: i64) -> Result<Option<ContactMessage>, StorageError> {
        let inner = self.inner.read().await;
        // ids are pushed in increasing order
        let found = inner
            .messages
            .binary_search_by_key(&id, |m| m.id)
            .ok()
            .map(|idx| inner.messages[idx].clone());
        Ok(found)
    }

    async fn list_all(&self) -> Result<Vec<ContactMessage>, StorageError> {
        Ok(self.inner.read().await.messages.clone())
    }

    async fn count(&self) -> Result<u64, StorageError> {
        Ok(self.inner.read().await.messages.len() as u64)
    }
}
