//! Storage crate: contact message persistence and the store abstraction.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – ContactMessage, NewContactMessage
//! - [`repository`] – ContactStore trait
//! - [`contact_repo`] – SqliteContactRepository (SQLite)
//! - [`inmemory`] – InMemoryContactStore
//! - [`sqlite_pool`] – SqlitePoolManager

mod contact_repo;
mod error;
mod inmemory;
mod models;
mod repository;
mod sqlite_pool;


pub use contact_repo::SqliteContactRepository;
pub use error::StorageError;
pub use inmemory::InMemoryContactStore;
pub use models::{ContactMessage, NewContactMessage};
pub use repository::ContactStore;
pub use sqlite_pool::SqlitePoolManager;
