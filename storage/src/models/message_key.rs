//! Composite identifier of a stored message: source chat id + source message id.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// Identifies one record. Rendered as `"{channel_id}_{message_id}"`, which is also the
/// primary key of the `messages` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageKey {
    pub channel_id: i64,
    pub message_id: i64,
}

impl MessageKey {
    pub fn new(channel_id: i64, message_id: i64) -> Self {
        Self {
            channel_id,
            message_id,
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.channel_id, self.message_id)
    }
}

impl FromStr for MessageKey {
    type Err = StorageError;

    /// Channel ids are negative for channels (`-100…`), so split on the last underscore.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (channel, message) = s
            .rsplit_once('_')
            .ok_or_else(|| StorageError::InvalidKey(s.to_string()))?;
        let channel_id = channel
            .parse()
            .map_err(|_| StorageError::InvalidKey(s.to_string()))?;
        let message_id = message
            .parse()
            .map_err(|_| StorageError::InvalidKey(s.to_string()))?;
        Ok(Self::new(channel_id, message_id))
    }
}
