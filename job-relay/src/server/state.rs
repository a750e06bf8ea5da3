use std::sync::Arc;

use crate::ingest::IngestionEndpoint;
use crate::worker::ProcessingWorker;

/// State shared with the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub ingest: Arc<IngestionEndpoint>,
    pub worker: Arc<ProcessingWorker>,
}

impl AppState {
    pub fn new(ingest: Arc<IngestionEndpoint>, worker: Arc<ProcessingWorker>) -> Self {
        Self { ingest, worker }
    }
}
