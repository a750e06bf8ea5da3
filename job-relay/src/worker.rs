//! Processing worker: one pass over a bounded batch of unprocessed posts.
//!
//! Per record: fingerprint, classify, persist the classification, then (relevant only) check
//! for an earlier forward, claim the fingerprint, send, and mark forwarded. Records are handled
//! one after another; a failure on one record never stops the rest of the batch.
//!
//! Classification is persisted before any send is attempted, so a failed send leaves the record
//! processed but unforwarded and it is not retried. The fingerprint claim is released on send
//! failure so a later copy from another channel can still go out.

use std::sync::Arc;

use chrono::Utc;
use job_filter::{fingerprint, RelevanceClassifier, Verdict};
use serde::Serialize;
use storage::{MessageRecord, MessageStore, StorageError};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::telegram::ForwardGateway;

/// Records fetched per pass.
pub const DEFAULT_BATCH_SIZE: i64 = 50;

/// What happened to one record during a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    Forwarded,
    /// Classified as not relevant.
    Rejected,
    /// Relevant, but the fingerprint was already forwarded or claimed.
    Duplicate,
    /// Classified and claimed, but the gateway failed; not retried. The claim was released.
    SendFailed,
    /// Send failed and the claim could not be released. The fingerprint stays claimed with no
    /// forwarded record behind it, so later copies of this job are suppressed.
    ClaimStuck,
    /// A store step failed. If it was the classification write the record stays unprocessed
    /// and is picked up again by the next pass.
    Failed,
}

/// Counts for one worker pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub run_id: Uuid,
    pub fetched: usize,
    pub forwarded: usize,
    pub rejected: usize,
    pub duplicates: usize,
    pub send_failed: usize,
    pub stuck_claims: usize,
    pub failed: usize,
}

impl BatchReport {
    fn new(run_id: Uuid, fetched: usize) -> Self {
        Self {
            run_id,
            fetched,
            ..Self::default()
        }
    }

    fn record(&mut self, outcome: RecordOutcome) {
        match outcome {
            RecordOutcome::Forwarded => self.forwarded += 1,
            RecordOutcome::Rejected => self.rejected += 1,
            RecordOutcome::Duplicate => self.duplicates += 1,
            RecordOutcome::SendFailed => self.send_failed += 1,
            RecordOutcome::ClaimStuck => {
                self.send_failed += 1;
                self.stuck_claims += 1;
            }
            RecordOutcome::Failed => self.failed += 1,
        }
    }
}

pub struct ProcessingWorker {
    store: Arc<dyn MessageStore>,
    classifier: Arc<RelevanceClassifier>,
    gateway: Arc<dyn ForwardGateway>,
    destination: i64,
    batch_size: i64,
}

impl ProcessingWorker {
    pub fn new(
        store: Arc<dyn MessageStore>,
        classifier: Arc<RelevanceClassifier>,
        gateway: Arc<dyn ForwardGateway>,
        destination: i64,
    ) -> Self {
        Self {
            store,
            classifier,
            gateway,
            destination,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn with_batch_size(mut self, batch_size: i64) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn batch_size(&self) -> i64 {
        self.batch_size
    }

    /// Runs one pass. Only a failure to fetch the batch is returned as an error; per-record
    /// failures are counted in the report.
    #[instrument(skip(self), fields(run_id = tracing::field::Empty))]
    pub async fn run_once(&self) -> Result<BatchReport, StorageError> {
        let run_id = Uuid::new_v4();
        tracing::Span::current().record("run_id", tracing::field::display(run_id));

        let batch = self
            .store
            .fetch_unprocessed(self.batch_size)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to fetch unprocessed posts");
                e
            })?;

        let mut report = BatchReport::new(run_id, batch.len());
        for record in &batch {
            let outcome = self.process_record(record).await;
            report.record(outcome);
        }

        info!(
            fetched = report.fetched,
            forwarded = report.forwarded,
            rejected = report.rejected,
            duplicates = report.duplicates,
            send_failed = report.send_failed,
            stuck_claims = report.stuck_claims,
            failed = report.failed,
            "Worker pass finished"
        );
        Ok(report)
    }

    #[instrument(skip(self, record), fields(key = %record.id))]
    pub async fn process_record(&self, record: &MessageRecord) -> RecordOutcome {
        let key = record.key();
        let fingerprint = fingerprint(&record.message_text);
        let verdict = self.classifier.classify(&record.message_text);
        let relevant = verdict.is_relevant();

        if let Err(e) = self
            .store
            .update_classification(&key, relevant, &fingerprint, Utc::now())
            .await
        {
            warn!(error = %e, "Failed to store classification; skipping");
            return RecordOutcome::Failed;
        }

        if let Verdict::Rejected(reason) = verdict {
            debug!(rule = %reason.rule, keyword = %reason.keyword, "Not relevant");
            return RecordOutcome::Rejected;
        }

        match self.store.exists_forwarded_for_fingerprint(&fingerprint).await {
            Ok(false) => {}
            Ok(true) => {
                debug!(%fingerprint, "Already forwarded");
                return RecordOutcome::Duplicate;
            }
            Err(e) => {
                warn!(error = %e, "Forward lookup failed; not forwarding");
                return RecordOutcome::Failed;
            }
        }

        match self.store.claim_fingerprint(&fingerprint, &key).await {
            Ok(true) => {}
            Ok(false) => {
                debug!(%fingerprint, "Fingerprint claimed by another post");
                return RecordOutcome::Duplicate;
            }
            Err(e) => {
                warn!(error = %e, "Failed to claim fingerprint; not forwarding");
                return RecordOutcome::Failed;
            }
        }

        if let Err(e) = self.gateway.send(self.destination, record).await {
            warn!(error = %e, "Send failed; post stays processed and unforwarded");
            if let Err(e) = self.store.release_claim(&fingerprint, &key).await {
                error!(
                    error = %e,
                    %fingerprint,
                    "Failed to release fingerprint claim; later copies will be suppressed"
                );
                return RecordOutcome::ClaimStuck;
            }
            return RecordOutcome::SendFailed;
        }

        // The claim stays in place if this write fails, so duplicates are still blocked.
        if let Err(e) = self.store.mark_forwarded(&key).await {
            error!(error = %e, "Post sent but forwarded flag not stored");
        }

        info!(channel = %record.channel_name, "Forwarded post");
        RecordOutcome::Forwarded
    }
}
