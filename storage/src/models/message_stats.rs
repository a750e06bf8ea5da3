//! Aggregate counts over the stored messages.
//!
//! Returned by MessageRepository::stats.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageStats {
    pub total_messages: i64,
    pub unprocessed_messages: i64,
    pub relevant_messages: i64,
    pub forwarded_messages: i64,
}
