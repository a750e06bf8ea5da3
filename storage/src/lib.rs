//! Storage crate: persistence of inbound channel posts and their processing state.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – MessageKey, MessageRecord, MessageStats
//! - [`repository`] – MessageStore trait
//! - [`message_repo`] – MessageRepository (SQLite)
//! - [`sqlite_pool`] – SqlitePoolManager

mod error;
mod message_repo;
mod models;
mod repository;
mod sqlite_pool;


pub use error::StorageError;
pub use message_repo::MessageRepository;
pub use models::{MessageKey, MessageRecord, MessageStats};
pub use repository::MessageStore;
pub use sqlite_pool::SqlitePoolManager;
