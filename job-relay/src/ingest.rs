//! Ingestion: maps webhook updates to [`MessageRecord`]s and upserts them.
//!
//! Every outcome is acknowledged to the sender with 200 (see
//! [`acknowledge_regardless_of_outcome`]); a non-200 would make Telegram redeliver the update.

use std::fmt;
use std::sync::Arc;

use axum::http::{Method, StatusCode};
use chrono::{DateTime, Utc};
use storage::{MessageKey, MessageRecord, MessageStore};
use tracing::{debug, error, info, instrument};

use crate::telegram::TelegramUpdate;

/// Why an inbound request was dropped without touching the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Request method was not POST.
    NotPost,
    /// Body could not be read or was not a decodable update.
    Malformed,
    /// Update carried neither `message` nor `channel_post`.
    NoMessage,
    /// Post had neither text/caption nor photo/document.
    NoContent,
    /// `date` is outside the representable range.
    BadTimestamp,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            DropReason::NotPost => "not_post",
            DropReason::Malformed => "malformed",
            DropReason::NoMessage => "no_message",
            DropReason::NoContent => "no_content",
            DropReason::BadTimestamp => "bad_timestamp",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    Stored(MessageKey),
    Dropped(DropReason),
    StoreFailed(String),
}

/// Builds the unprocessed record for an update.
///
/// Only `text` becomes `message_text`; a caption makes a media post acceptable but is not
/// copied, so captioned media is stored with empty text.
pub fn map_update(
    update: &TelegramUpdate,
    received_at: DateTime<Utc>,
) -> Result<MessageRecord, DropReason> {
    let post = update.post().ok_or(DropReason::NoMessage)?;

    if !post.has_text() && !post.has_media() {
        return Err(DropReason::NoContent);
    }

    let message_timestamp =
        DateTime::<Utc>::from_timestamp(post.date, 0).ok_or(DropReason::BadTimestamp)?;

    Ok(MessageRecord::new_inbound(
        post.chat.id,
        post.chat.title.clone().unwrap_or_default(),
        post.message_id,
        post.text.clone().unwrap_or_default(),
        message_timestamp,
        received_at,
    ))
}

/// Policy for the webhook response: the sender is never asked to retry, whatever happened.
/// Store failures are logged here; the post is lost.
pub fn acknowledge_regardless_of_outcome(outcome: &IngestOutcome) -> StatusCode {
    match outcome {
        IngestOutcome::Stored(key) => debug!(key = %key, "Acknowledging stored post"),
        IngestOutcome::Dropped(reason) => debug!(%reason, "Acknowledging dropped update"),
        IngestOutcome::StoreFailed(e) => {
            error!(error = %e, "Acknowledging update that could not be stored")
        }
    }
    StatusCode::OK
}

/// Accepts inbound webhook requests and upserts the mapped record.
#[derive(Clone)]
pub struct IngestionEndpoint {
    store: Arc<dyn MessageStore>,
}

impl IngestionEndpoint {
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self, body), fields(body_len = body.len()))]
    pub async fn ingest(&self, method: &Method, body: &[u8]) -> IngestOutcome {
        if *method != Method::POST {
            return IngestOutcome::Dropped(DropReason::NotPost);
        }

        let update: TelegramUpdate = match serde_json::from_slice(body) {
            Ok(update) => update,
            Err(e) => {
                debug!(error = %e, "Undecodable update");
                return IngestOutcome::Dropped(DropReason::Malformed);
            }
        };

        let record = match map_update(&update, Utc::now()) {
            Ok(record) => record,
            Err(reason) => return IngestOutcome::Dropped(reason),
        };
        let key = record.key();

        match self.store.upsert(&record).await {
            Ok(()) => {
                info!(
                    update_id = update.update_id,
                    key = %key,
                    channel = %record.channel_name,
                    "Stored inbound post"
                );
                IngestOutcome::Stored(key)
            }
            Err(e) => IngestOutcome::StoreFailed(e.to_string()),
        }
    }
}
