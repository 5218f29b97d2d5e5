//! Chat platform contract and the outbound message model.
//!
//! The bot's chat client is consumed through [`ChatClient`]; this module
//! only defines the shapes the alert subsystem needs. Lookups return
//! `Ok(None)` for targets that no longer exist or are not visible to the
//! bot, so absence is an explicit case at every call site.

use async_trait::async_trait;
use serde::Serialize;

use crate::errors::ChatError;

/// Embed accent color for alert messages.
pub const ALERT_COLOR: u32 = 0x00fa_4454;

/// A resolved chat channel.
#[derive(Debug, Clone)]
pub struct Channel {
    pub id: String,
    /// Human-readable name, for log lines.
    pub name: String,
    /// Owning guild, `None` for DM channels.
    pub guild_id: Option<String>,
}

/// A resolved chat user.
#[derive(Debug, Clone)]
pub struct ChatUser {
    pub id: String,
    /// Display tag, for operator-facing log lines.
    pub tag: String,
}

/// An interactive control attached to an outbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageAction {
    /// Button that removes one alert when pressed.
    RemoveAlert {
        user_id: String,
        item_id: String,
        label: String,
    },
}

/// A single embed block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Embed {
    pub description: String,
    pub color: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

/// Structured outbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    /// Plain-text content, typically a user mention.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub embeds: Vec<Embed>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<MessageAction>,
}

/// Chat platform client contract.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Resolve a channel by id.
    async fn channel(&self, channel_id: &str) -> Result<Option<Channel>, ChatError>;

    /// Resolve a user by id.
    async fn user(&self, user_id: &str) -> Result<Option<ChatUser>, ChatError>;

    /// Whether the user is currently a member of the guild.
    async fn is_member(&self, guild_id: &str, user_id: &str) -> Result<bool, ChatError>;

    /// Deliver a message to a channel.
    async fn send(&self, channel_id: &str, message: OutboundMessage) -> Result<(), ChatError>;
}

/// Mention markup for a user, as rendered by the chat platform.
#[must_use]
pub fn mention(user_id: &str) -> String {
    format!("<@{user_id}>")
}
