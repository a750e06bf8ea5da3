//! # Job relay application
//!
//! Receives channel posts on a webhook, stores them, and on each worker pass classifies,
//! deduplicates and forwards relevant job posts to one destination chat.
//! Text rules come from `job-filter`, persistence from `storage`.

pub mod cli;
pub mod components;
pub mod config;
pub mod core;
pub mod ingest;
pub mod runner;
pub mod server;
pub mod telegram;
pub mod worker;


pub use cli::{load_config, Cli, Commands};
pub use components::{build_relay_components, RelayComponents};
pub use config::AppConfig;
pub use core::{init_tracing, RelayError, Result};
pub use ingest::{
    acknowledge_regardless_of_outcome, map_update, DropReason, IngestOutcome, IngestionEndpoint,
};
pub use runner::{run_server, run_worker_once};
pub use server::{build_router, AppState};
pub use telegram::{
    format_job_post, ForwardGateway, ForwardMode, InboundChat, InboundMessage, TelegramGateway,
    TelegramUpdate,
};
pub use worker::{BatchReport, ProcessingWorker, RecordOutcome, DEFAULT_BATCH_SIZE};
