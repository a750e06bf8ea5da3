//! AppConfig: everything the relay needs at startup. Loaded from env.

use anyhow::{Context, Result};
use std::env;

use crate::telegram::ForwardMode;

/// Relay config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// BOT_TOKEN
    pub bot_token: String,
    /// PERSONAL_CHAT_ID: the single chat every relevant post is forwarded to
    pub destination_chat_id: i64,
    /// PORT
    pub port: u16,
    /// DATABASE_URL: SQLite file path
    pub database_url: String,
    /// LOG_FILE: empty means stdout only
    pub log_file: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// FORWARD_MODE: `text` (sendMessage with template) or `native` (forwardMessage)
    pub forward_mode: ForwardMode,
    /// RELEVANCE_RULES_FILE: optional JSON rule tables; built-in rules when unset
    pub rules_file: Option<String>,
}

impl AppConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN and `port` overrides PORT.
    pub fn load(token: Option<String>, port: Option<u16>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN").context("BOT_TOKEN not set")?,
        };
        let destination_chat_id = env::var("PERSONAL_CHAT_ID")
            .context("PERSONAL_CHAT_ID not set")?
            .trim()
            .parse::<i64>()
            .context("PERSONAL_CHAT_ID is not a chat id")?;
        let port = match port {
            Some(port) => port,
            None => env::var("PORT")
                .ok()
                .map(|s| s.parse::<u16>().context("PORT is not a port number"))
                .transpose()?
                .unwrap_or(8080),
        };
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "./job_relay.db".to_string());
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/job-relay.log".to_string());
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let forward_mode = env::var("FORWARD_MODE")
            .ok()
            .map(|s| s.parse::<ForwardMode>())
            .transpose()?
            .unwrap_or_default();
        let rules_file = env::var("RELEVANCE_RULES_FILE").ok();

        Ok(Self {
            bot_token,
            destination_chat_id,
            port,
            database_url,
            log_file,
            telegram_api_url,
            forward_mode,
            rules_file,
        })
    }

    /// Validate config (e.g. telegram_api_url must be valid URL if set).
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            anyhow::bail!("BOT_TOKEN is empty");
        }
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        Ok(())
    }
}
