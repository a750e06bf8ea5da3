//! Message repository: persistence and queries for the processing pipeline.
//!
//! Uses SqlitePoolManager and the models (MessageKey, MessageRecord, MessageStats).
//! External: SQLite via sqlx. Fingerprint claims live in their own table so that the
//! "claim then send" step is a single conditional insert.

use crate::error::StorageError;
use crate::models::{MessageKey, MessageRecord, MessageStats};
use crate::repository::MessageStore;
use crate::sqlite_pool::SqlitePoolManager;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

#[derive(Clone)]
pub struct MessageRepository {
    pool_manager: SqlitePoolManager,
}

impl MessageRepository {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), sqlx::Error> {
        info!("Creating database tables if not exist");

        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS messages (
                id TEXT PRIMARY KEY,
                channel_id INTEGER NOT NULL,
                channel_name TEXT NOT NULL,
                message_id INTEGER NOT NULL,
                message_text TEXT NOT NULL,
                message_timestamp TEXT NOT NULL,
                received_at TEXT NOT NULL,
                is_processed INTEGER NOT NULL DEFAULT 0,
                is_relevant INTEGER,
                processed_at TEXT,
                job_fingerprint TEXT,
                is_forwarded INTEGER NOT NULL DEFAULT 0
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS forward_claims (
                fingerprint TEXT PRIMARY KEY,
                message_key TEXT NOT NULL,
                claimed_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_messages_is_processed ON messages(is_processed);
            CREATE INDEX IF NOT EXISTS idx_messages_fingerprint ON messages(job_fingerprint, is_forwarded);
            "#,
        )
        .execute(pool)
        .await?;

        info!("Database tables created successfully");
        Ok(())
    }

    async fn exists(&self, key: &MessageKey) -> Result<bool, StorageError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM messages WHERE id = ?")
            .bind(key.to_string())
            .fetch_one(self.pool_manager.pool())
            .await?;
        Ok(count.0 > 0)
    }
}

#[async_trait]
impl MessageStore for MessageRepository {
    async fn upsert(&self, record: &MessageRecord) -> Result<(), StorageError> {
        let pool = self.pool_manager.pool();

        // ON CONFLICT keeps the original rowid, so re-ingested posts keep their place in
        // fetch order while every column is replaced.
        sqlx::query(
            r#"
            INSERT INTO messages (
                id, channel_id, channel_name, message_id, message_text, message_timestamp,
                received_at, is_processed, is_relevant, processed_at, job_fingerprint, is_forwarded
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                channel_id = excluded.channel_id,
                channel_name = excluded.channel_name,
                message_id = excluded.message_id,
                message_text = excluded.message_text,
                message_timestamp = excluded.message_timestamp,
                received_at = excluded.received_at,
                is_processed = excluded.is_processed,
                is_relevant = excluded.is_relevant,
                processed_at = excluded.processed_at,
                job_fingerprint = excluded.job_fingerprint,
                is_forwarded = excluded.is_forwarded
            "#,
        )
        .bind(&record.id)
        .bind(record.channel_id)
        .bind(&record.channel_name)
        .bind(record.message_id)
        .bind(&record.message_text)
        .bind(record.message_timestamp)
        .bind(record.received_at)
        .bind(record.is_processed)
        .bind(record.is_relevant)
        .bind(record.processed_at)
        .bind(&record.job_fingerprint)
        .bind(record.is_forwarded)
        .execute(pool)
        .await?;

        info!(id = %record.id, channel = %record.channel_name, "Upserted message");
        Ok(())
    }

    async fn get(&self, key: &MessageKey) -> Result<Option<MessageRecord>, StorageError> {
        let record = sqlx::query_as::<_, MessageRecord>("SELECT * FROM messages WHERE id = ?")
            .bind(key.to_string())
            .fetch_optional(self.pool_manager.pool())
            .await?;

        Ok(record)
    }

    async fn fetch_unprocessed(&self, limit: i64) -> Result<Vec<MessageRecord>, StorageError> {
        let records = sqlx::query_as::<_, MessageRecord>(
            "SELECT * FROM messages WHERE is_processed = 0 ORDER BY rowid LIMIT ?",
        )
        .bind(limit)
        .fetch_all(self.pool_manager.pool())
        .await?;

        debug!("Fetched {} unprocessed messages", records.len());
        Ok(records)
    }

    async fn update_classification(
        &self,
        key: &MessageKey,
        is_relevant: bool,
        fingerprint: &str,
        processed_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let result = sqlx::query(
            r#"
            UPDATE messages
            SET is_processed = 1, is_relevant = ?, job_fingerprint = ?, processed_at = ?
            WHERE id = ? AND is_processed = 0
            "#,
        )
        .bind(is_relevant)
        .bind(fingerprint)
        .bind(processed_at)
        .bind(key.to_string())
        .execute(self.pool_manager.pool())
        .await?;

        if result.rows_affected() == 0 {
            return if self.exists(key).await? {
                Err(StorageError::AlreadyProcessed(key.to_string()))
            } else {
                Err(StorageError::NotFound(key.to_string()))
            };
        }

        Ok(())
    }

    async fn mark_forwarded(&self, key: &MessageKey) -> Result<(), StorageError> {
        let result = sqlx::query("UPDATE messages SET is_forwarded = 1 WHERE id = ?")
            .bind(key.to_string())
            .execute(self.pool_manager.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(key.to_string()));
        }
        Ok(())
    }

    async fn exists_forwarded_for_fingerprint(
        &self,
        fingerprint: &str,
    ) -> Result<bool, StorageError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM messages WHERE job_fingerprint = ? AND is_forwarded = 1",
        )
        .bind(fingerprint)
        .fetch_one(self.pool_manager.pool())
        .await?;

        Ok(count.0 > 0)
    }

    async fn claim_fingerprint(
        &self,
        fingerprint: &str,
        key: &MessageKey,
    ) -> Result<bool, StorageError> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO forward_claims (fingerprint, message_key, claimed_at) VALUES (?, ?, ?)",
        )
        .bind(fingerprint)
        .bind(key.to_string())
        .bind(Utc::now())
        .execute(self.pool_manager.pool())
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn release_claim(&self, fingerprint: &str, key: &MessageKey) -> Result<(), StorageError> {
        let result =
            sqlx::query("DELETE FROM forward_claims WHERE fingerprint = ? AND message_key = ?")
                .bind(fingerprint)
                .bind(key.to_string())
                .execute(self.pool_manager.pool())
                .await?;

        debug!(
            fingerprint,
            key = %key,
            released = result.rows_affected(),
            "Released forward claim"
        );
        Ok(())
    }

    async fn stats(&self) -> Result<MessageStats, StorageError> {
        let pool = self.pool_manager.pool();

        let counts: (i64, i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COUNT(*),
                COALESCE(SUM(CASE WHEN is_processed = 0 THEN 1 ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN is_relevant = 1 THEN 1 ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN is_forwarded = 1 THEN 1 ELSE 0 END), 0)
            FROM messages
            "#,
        )
        .fetch_one(pool)
        .await?;

        Ok(MessageStats {
            total_messages: counts.0,
            unprocessed_messages: counts.1,
            relevant_messages: counts.2,
            forwarded_messages: counts.3,
        })
    }
}
