//! Inbound webhook payload: the subset of a Telegram `Update` the relay reads.
//!
//! Unknown fields are ignored; optional Telegram fields default to empty.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramUpdate {
    #[serde(default)]
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<InboundMessage>,
    #[serde(default)]
    pub channel_post: Option<InboundMessage>,
}

impl TelegramUpdate {
    /// The post carried by this update; `message` wins over `channel_post`.
    pub fn post(&self) -> Option<&InboundMessage> {
        self.message.as_ref().or(self.channel_post.as_ref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InboundMessage {
    pub message_id: i64,
    /// Unix time in seconds.
    pub date: i64,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    pub chat: InboundChat,
    #[serde(default)]
    pub photo: Vec<PhotoSize>,
    #[serde(default)]
    pub document: Option<Document>,
}

impl InboundMessage {
    pub fn has_text(&self) -> bool {
        let non_empty = |s: &Option<String>| s.as_deref().is_some_and(|s| !s.is_empty());
        non_empty(&self.text) || non_empty(&self.caption)
    }

    pub fn has_media(&self) -> bool {
        !self.photo.is_empty() || self.document.is_some()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InboundChat {
    pub id: i64,
    /// Absent for private chats.
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhotoSize {
    pub file_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    pub file_id: String,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
}
