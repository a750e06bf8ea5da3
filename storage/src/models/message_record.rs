//! Message record model for persistence.
//!
//! Maps to the `messages` table and is used by MessageRepository. Column names are the
//! field names below and must stay stable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::MessageKey;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MessageRecord {
    /// Rendered [`MessageKey`]; primary key.
    pub id: String,
    pub channel_id: i64,
    pub channel_name: String,
    pub message_id: i64,
    pub message_text: String,
    pub message_timestamp: DateTime<Utc>,
    pub received_at: DateTime<Utc>,
    pub is_processed: bool,
    pub is_relevant: Option<bool>,
    pub processed_at: Option<DateTime<Utc>>,
    pub job_fingerprint: Option<String>,
    pub is_forwarded: bool,
}

impl MessageRecord {
    /// Creates an unprocessed, unforwarded record as produced by ingestion.
    pub fn new_inbound(
        channel_id: i64,
        channel_name: String,
        message_id: i64,
        message_text: String,
        message_timestamp: DateTime<Utc>,
        received_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: MessageKey::new(channel_id, message_id).to_string(),
            channel_id,
            channel_name,
            message_id,
            message_text,
            message_timestamp,
            received_at,
            is_processed: false,
            is_relevant: None,
            processed_at: None,
            job_fingerprint: None,
            is_forwarded: false,
        }
    }

    pub fn key(&self) -> MessageKey {
        MessageKey::new(self.channel_id, self.message_id)
    }
}
