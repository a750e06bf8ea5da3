//! Store trait for the message pipeline. Implementations (e.g. [`MessageRepository`]) provide
//! concrete persistence; single-record operations are atomic, nothing spans operations.
//!
//! [`MessageRepository`]: crate::MessageRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::StorageError;
use crate::models::{MessageKey, MessageRecord, MessageStats};

#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Creates or fully replaces the record at its key, including processing and forward state.
    async fn upsert(&self, record: &MessageRecord) -> Result<(), StorageError>;

    /// Returns the record at `key`, or None if not found.
    async fn get(&self, key: &MessageKey) -> Result<Option<MessageRecord>, StorageError>;

    /// Returns up to `limit` records with `is_processed = false`, oldest insert first.
    async fn fetch_unprocessed(&self, limit: i64) -> Result<Vec<MessageRecord>, StorageError>;

    /// Sets `is_processed`, `is_relevant`, `job_fingerprint` and `processed_at` together.
    /// Write-once: fails with [`StorageError::AlreadyProcessed`] if the record was processed.
    async fn update_classification(
        &self,
        key: &MessageKey,
        is_relevant: bool,
        fingerprint: &str,
        processed_at: DateTime<Utc>,
    ) -> Result<(), StorageError>;

    /// Sets `is_forwarded = true`.
    async fn mark_forwarded(&self, key: &MessageKey) -> Result<(), StorageError>;

    /// True if any record with this fingerprint has been forwarded.
    async fn exists_forwarded_for_fingerprint(&self, fingerprint: &str)
        -> Result<bool, StorageError>;

    /// Conditional write: records `key` as the sole forwarder of `fingerprint`.
    /// Returns false if the fingerprint is already claimed (by any key, including `key`).
    async fn claim_fingerprint(
        &self,
        fingerprint: &str,
        key: &MessageKey,
    ) -> Result<bool, StorageError>;

    /// Drops the claim on `fingerprint` if `key` holds it.
    async fn release_claim(&self, fingerprint: &str, key: &MessageKey)
        -> Result<(), StorageError>;

    async fn stats(&self) -> Result<MessageStats, StorageError>;
}
