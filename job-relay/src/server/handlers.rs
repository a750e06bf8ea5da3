//! Route handlers.
//!
//! `/webhook` always answers 200 so Telegram never redelivers. `/worker` is a liveness probe on
//! GET and runs one pass on POST (the external scheduler's trigger).

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::{Method, StatusCode};
use tracing::{debug, error};

use super::state::AppState;
use crate::ingest::{acknowledge_regardless_of_outcome, DropReason, IngestOutcome};

/// An unreadable body (over the size limit, aborted upload) is dropped like a malformed one
/// instead of letting the extractor answer with its own status.
pub async fn webhook_handler(
    State(state): State<AppState>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> StatusCode {
    let outcome = match body {
        Ok(body) => state.ingest.ingest(&method, &body).await,
        Err(rejection) => {
            debug!(error = %rejection, status = %rejection.status(), "Unreadable webhook body");
            IngestOutcome::Dropped(DropReason::Malformed)
        }
    };
    acknowledge_regardless_of_outcome(&outcome)
}

pub async fn worker_handler(
    State(state): State<AppState>,
    method: Method,
) -> (StatusCode, &'static str) {
    match method {
        Method::GET => (StatusCode::OK, "worker alive"),
        Method::POST => match state.worker.run_once().await {
            Ok(_) => (StatusCode::OK, "processed"),
            Err(e) => {
                error!(error = %e, "Worker pass aborted");
                (StatusCode::INTERNAL_SERVER_ERROR, "failed to fetch")
            }
        },
        _ => (StatusCode::METHOD_NOT_ALLOWED, "method not allowed"),
    }
}
