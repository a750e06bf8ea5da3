//! Component factory: builds RelayComponents from config. Isolates assembly logic from runner.

use std::sync::Arc;

use anyhow::Result;
use job_filter::{RelevanceClassifier, RelevanceRules};
use storage::{MessageRepository, MessageStore};
use tracing::{error, info, instrument};

use crate::config::AppConfig;
use crate::ingest::IngestionEndpoint;
use crate::server::AppState;
use crate::telegram::{ForwardGateway, TelegramGateway};
use crate::worker::ProcessingWorker;

/// Everything the HTTP server and a manual worker pass need.
#[derive(Clone)]
pub struct RelayComponents {
    pub store: Arc<dyn MessageStore>,
    pub classifier: Arc<RelevanceClassifier>,
    pub gateway: Arc<dyn ForwardGateway>,
    pub ingest: Arc<IngestionEndpoint>,
    pub worker: Arc<ProcessingWorker>,
}

impl RelayComponents {
    pub fn app_state(&self) -> AppState {
        AppState::new(self.ingest.clone(), self.worker.clone())
    }
}

/// Built-in rules, or the JSON tables at RELEVANCE_RULES_FILE when set.
pub fn load_classifier(config: &AppConfig) -> Result<RelevanceClassifier> {
    let rules = match config.rules_file {
        Some(ref path) => {
            let rules = RelevanceRules::from_json_file(path).map_err(|e| {
                error!(error = %e, path = %path, "Failed to load relevance rules");
                anyhow::anyhow!("Failed to load relevance rules: {}", e)
            })?;
            info!(path = %path, "Using relevance rules from file");
            rules
        }
        None => RelevanceRules::default(),
    };
    Ok(RelevanceClassifier::new(rules))
}

/// Wires the given store and gateway with the configured classifier and destination.
pub fn assemble_components(
    config: &AppConfig,
    store: Arc<dyn MessageStore>,
    gateway: Arc<dyn ForwardGateway>,
) -> Result<RelayComponents> {
    let classifier = Arc::new(load_classifier(config)?);
    let ingest = Arc::new(IngestionEndpoint::new(store.clone()));
    let worker = Arc::new(ProcessingWorker::new(
        store.clone(),
        classifier.clone(),
        gateway.clone(),
        config.destination_chat_id,
    ));

    Ok(RelayComponents {
        store,
        classifier,
        gateway,
        ingest,
        worker,
    })
}

/// Opens the SQLite store and the Telegram gateway, then assembles the components.
#[instrument(skip(config))]
pub async fn build_relay_components(config: &AppConfig) -> Result<RelayComponents> {
    let repo = MessageRepository::new(&config.database_url)
        .await
        .map_err(|e| {
            error!(
                error = %e,
                database_url = %config.database_url,
                "Failed to initialize message storage"
            );
            anyhow::anyhow!("Failed to initialize message storage: {}", e)
        })?;

    let gateway = TelegramGateway::new(
        config.bot_token.clone(),
        config.telegram_api_url.as_deref(),
        config.forward_mode,
    )?;
    info!(mode = %config.forward_mode, "Telegram gateway ready");

    assemble_components(config, Arc::new(repo), Arc::new(gateway))
}
