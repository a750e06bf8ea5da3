//! Shared fixtures for job-relay integration tests: temp SQLite stores, a recording gateway,
//! webhook payload builders and worker wiring.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use job_filter::RelevanceClassifier;
use job_relay::{ForwardGateway, IngestionEndpoint, ProcessingWorker, RelayError};
use serde_json::{json, Value};
use storage::{
    MessageKey, MessageRecord, MessageRepository, MessageStats, MessageStore, StorageError,
};
use tempfile::TempDir;

pub const DESTINATION: i64 = 555;

/// Opens a fresh repository in its own temp dir. Keep the TempDir alive for the test.
pub async fn temp_repo() -> (TempDir, Arc<MessageRepository>) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("relay.db");
    let repo = MessageRepository::new(&path.to_string_lossy())
        .await
        .expect("Failed to create repository");
    (dir, Arc::new(repo))
}

/// Gateway that records every delivery instead of calling Telegram.
#[derive(Debug, Default, Clone)]
pub struct RecordingGateway {
    sent: Arc<Mutex<Vec<(i64, MessageRecord)>>>,
    fail: Arc<AtomicBool>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every later send returns an error while set.
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<(i64, MessageRecord)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl ForwardGateway for RecordingGateway {
    async fn send(&self, destination: i64, record: &MessageRecord) -> job_relay::Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(RelayError::Telegram("Bad Request: chat not found".to_string()));
        }
        self.sent.lock().unwrap().push((destination, record.clone()));
        Ok(())
    }
}

pub fn worker(store: Arc<dyn MessageStore>, gateway: Arc<dyn ForwardGateway>) -> ProcessingWorker {
    ProcessingWorker::new(
        store,
        Arc::new(RelevanceClassifier::default()),
        gateway,
        DESTINATION,
    )
}

pub fn ingest(store: Arc<dyn MessageStore>) -> IngestionEndpoint {
    IngestionEndpoint::new(store)
}

/// `channel_post` update with text.
pub fn channel_post(chat_id: i64, title: &str, message_id: i64, text: &str) -> Value {
    json!({
        "update_id": message_id,
        "channel_post": {
            "message_id": message_id,
            "date": 1_735_689_600,
            "chat": {"id": chat_id, "title": title, "type": "channel"},
            "text": text
        }
    })
}

/// `channel_post` update with a photo and caption but no text.
pub fn photo_post(chat_id: i64, message_id: i64, caption: &str) -> Value {
    json!({
        "update_id": message_id,
        "channel_post": {
            "message_id": message_id,
            "date": 1_735_689_600,
            "chat": {"id": chat_id, "title": "Posters", "type": "channel"},
            "caption": caption,
            "photo": [{"file_id": "small", "width": 90, "height": 90}, {"file_id": "large"}]
        }
    })
}

pub fn body(update: &Value) -> Vec<u8> {
    serde_json::to_vec(update).expect("serialize update")
}

/// Store whose every operation fails, as if the database were unreachable.
#[derive(Debug, Default)]
pub struct UnavailableStore;

fn unavailable<T>() -> Result<T, StorageError> {
    Err(StorageError::Database("database is locked".to_string()))
}

#[async_trait]
impl MessageStore for UnavailableStore {
    async fn upsert(&self, _record: &MessageRecord) -> Result<(), StorageError> {
        unavailable()
    }

    async fn get(&self, _key: &MessageKey) -> Result<Option<MessageRecord>, StorageError> {
        unavailable()
    }

    async fn fetch_unprocessed(&self, _limit: i64) -> Result<Vec<MessageRecord>, StorageError> {
        unavailable()
    }

    async fn update_classification(
        &self,
        _key: &MessageKey,
        _is_relevant: bool,
        _fingerprint: &str,
        _processed_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        unavailable()
    }

    async fn mark_forwarded(&self, _key: &MessageKey) -> Result<(), StorageError> {
        unavailable()
    }

    async fn exists_forwarded_for_fingerprint(&self, _fingerprint: &str) -> Result<bool, StorageError> {
        unavailable()
    }

    async fn claim_fingerprint(&self, _fingerprint: &str, _key: &MessageKey) -> Result<bool, StorageError> {
        unavailable()
    }

    async fn release_claim(&self, _fingerprint: &str, _key: &MessageKey) -> Result<(), StorageError> {
        unavailable()
    }

    async fn stats(&self) -> Result<MessageStats, StorageError> {
        unavailable()
    }
}
