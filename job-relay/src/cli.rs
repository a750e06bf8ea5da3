//! CLI parser and config loading.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "job-relay")]
#[command(about = "Relay relevant job posts from Telegram channels to one chat", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the /webhook and /worker endpoints (config from env; flags override).
    Serve {
        #[arg(short, long)]
        token: Option<String>,
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Run one worker pass over unprocessed posts and print the report.
    Work {
        #[arg(short, long)]
        token: Option<String>,
        #[arg(short, long)]
        batch_size: Option<i64>,
    },
}

/// Load AppConfig from environment. `token` overrides BOT_TOKEN, `port` overrides PORT.
pub fn load_config(token: Option<String>, port: Option<u16>) -> Result<AppConfig> {
    AppConfig::load(token, port)
}
