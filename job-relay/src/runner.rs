use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::components::build_relay_components;
use crate::config::AppConfig;
use crate::core::init_tracing;
use crate::server::build_router;
use crate::worker::{BatchReport, ProcessingWorker};

/// Main entry: validate config, init logging, build components, then serve `/webhook` and
/// `/worker` on `0.0.0.0:{port}` until Ctrl-C.
#[instrument(skip(config))]
pub async fn run_server(config: AppConfig) -> Result<()> {
    config.validate()?;
    init_tracing(&config.log_file)?;

    info!(
        database_url = %config.database_url,
        port = config.port,
        forward_mode = %config.forward_mode,
        "Initializing job relay"
    );

    let components = build_relay_components(&config).await?;
    let app = build_router(components.app_state());

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Job relay listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Job relay stopped");
    Ok(())
}

/// Runs a single worker pass outside the HTTP server. `batch_size` overrides the default.
#[instrument(skip(config))]
pub async fn run_worker_once(config: AppConfig, batch_size: Option<i64>) -> Result<BatchReport> {
    config.validate()?;
    init_tracing(&config.log_file)?;

    let components = build_relay_components(&config).await?;
    let report = match batch_size {
        Some(size) => {
            let worker = ProcessingWorker::new(
                components.store.clone(),
                components.classifier.clone(),
                components.gateway.clone(),
                config.destination_chat_id,
            )
            .with_batch_size(size);
            worker.run_once().await?
        }
        None => components.worker.run_once().await?,
    };

    let stats = components.store.stats().await?;
    info!(
        total = stats.total_messages,
        unprocessed = stats.unprocessed_messages,
        relevant = stats.relevant_messages,
        forwarded = stats.forwarded_messages,
        "Store totals after pass"
    );

    Ok(report)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
