//! Telegram boundary: inbound webhook update types and the outbound forward gateway.

pub mod gateway;
pub mod update;

pub use gateway::{format_job_post, ForwardGateway, ForwardMode, TelegramGateway};
pub use update::{Document, InboundChat, InboundMessage, PhotoSize, TelegramUpdate};
