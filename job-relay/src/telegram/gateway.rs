//! Outbound side: delivering a processed post to the destination chat.
//!
//! [`ForwardGateway`] is transport-agnostic; [`TelegramGateway`] implements it via teloxide.
//! One attempt per call, no retry: any non-OK Bot API response or transport error is a failure.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use storage::MessageRecord;
use teloxide::prelude::Requester;
use teloxide::types::{ChatId, MessageId};
use tracing::{info, instrument};

use crate::core::{RelayError, Result};

/// How a post reaches the destination chat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ForwardMode {
    /// `sendMessage` with [`format_job_post`] text.
    #[default]
    Text,
    /// `forwardMessage` of the original post.
    Native,
}

impl FromStr for ForwardMode {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(ForwardMode::Text),
            "native" | "forward" => Ok(ForwardMode::Native),
            other => Err(RelayError::Config(format!("unknown FORWARD_MODE: {}", other))),
        }
    }
}

impl fmt::Display for ForwardMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForwardMode::Text => f.write_str("text"),
            ForwardMode::Native => f.write_str("native"),
        }
    }
}

/// Delivers one record to a destination chat.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ForwardGateway: Send + Sync {
    async fn send(&self, destination: i64, record: &MessageRecord) -> Result<()>;
}

/// Text sent to the destination in [`ForwardMode::Text`].
pub fn format_job_post(record: &MessageRecord) -> String {
    format!(
        "📢 Job Post\n\nChannel: {}\n\n{}",
        record.channel_name, record.message_text
    )
}

/// Teloxide-based implementation of [`ForwardGateway`].
pub struct TelegramGateway {
    bot: teloxide::Bot,
    mode: ForwardMode,
}

impl TelegramGateway {
    /// Creates a gateway for the given bot token. `api_url` points teloxide at another Bot API
    /// server (local server or test mock).
    pub fn new(token: String, api_url: Option<&str>, mode: ForwardMode) -> Result<Self> {
        let mut bot = teloxide::Bot::new(token);
        if let Some(url) = api_url {
            let url = reqwest::Url::parse(url)
                .map_err(|e| RelayError::Config(format!("invalid Telegram API URL {}: {}", url, e)))?;
            bot = bot.set_api_url(url);
        }
        Ok(Self { bot, mode })
    }

    pub fn mode(&self) -> ForwardMode {
        self.mode
    }

    /// `sendMessage {chat_id, text}`.
    pub async fn send_text(&self, destination: i64, text: &str) -> Result<()> {
        self.bot.send_message(ChatId(destination), text).await?;
        Ok(())
    }

    /// `forwardMessage {chat_id, from_chat_id, message_id}`.
    pub async fn forward_original(&self, destination: i64, record: &MessageRecord) -> Result<()> {
        let message_id = i32::try_from(record.message_id).map_err(|_| {
            RelayError::Telegram(format!("message_id out of range: {}", record.message_id))
        })?;
        self.bot
            .forward_message(
                ChatId(destination),
                ChatId(record.channel_id),
                MessageId(message_id),
            )
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ForwardGateway for TelegramGateway {
    #[instrument(skip(self, record), fields(key = %record.id, mode = %self.mode))]
    async fn send(&self, destination: i64, record: &MessageRecord) -> Result<()> {
        match self.mode {
            ForwardMode::Text => self.send_text(destination, &format_job_post(record)).await?,
            ForwardMode::Native => self.forward_original(destination, record).await?,
        }

        info!(destination, "Post delivered");
        Ok(())
    }
}
