use async_trait::async_trait;

use crate::error::StorageError;
use crate::models::{ContactMessage, NewContactMessage};

/// Keyed storage of contact messages.
///
/// Records are immutable once created; there is no update or delete.
/// Implementations must assign ids so that concurrent `create` calls never
/// observe the same id.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Stores a new message, assigning its id and creation timestamp.
    async fn create(&self, data: NewContactMessage) -> Result<ContactMessage, StorageError>;
    async fn get(&self, id: i64) -> Result<Option<ContactMessage>, StorageError>;
    /// All messages in creation order.
    async fn list_all(&self) -> Result<Vec<ContactMessage>, StorageError>;
    async fn count(&self) -> Result<u64, StorageError>;
}
