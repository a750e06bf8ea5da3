//! Data models for storage (message key, message records, stats).
//!
//! Used by MessageRepository and callers of the storage API.

mod message_key;
mod message_record;
mod message_stats;

pub use message_key::MessageKey;
pub use message_record::MessageRecord;
pub use message_stats::MessageStats;
