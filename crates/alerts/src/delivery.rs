//! Delivery senders: format and transmit alert notifications.
//!
//! Everything here is best-effort. Transmission failures are logged with
//! an operator fallback and swallowed; only store and catalog faults
//! propagate, to be caught at the cycle's per-user boundary.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, error, warn};

use crate::catalog::ItemCatalog;
use crate::chat::{mention, ChatClient, Channel, Embed, MessageAction, OutboundMessage, ALERT_COLOR};
use crate::entities::{Alert, CommandOrigin};
use crate::errors::{ChatError, SendError};
use crate::storage::UserStore;
use crate::text::MessageText;

/// Formats and transmits alert notifications.
pub struct AlertSender {
    store: Arc<dyn UserStore>,
    chat: Arc<dyn ChatClient>,
    catalog: Arc<dyn ItemCatalog>,
    text: Arc<dyn MessageText>,
}

impl AlertSender {
    #[must_use]
    pub fn new(
        store: Arc<dyn UserStore>,
        chat: Arc<dyn ChatClient>,
        catalog: Arc<dyn ItemCatalog>,
        text: Arc<dyn MessageText>,
    ) -> Self {
        Self {
            store,
            chat,
            catalog,
            text,
        }
    }

    /// Send one "item available" message per alert.
    ///
    /// The user record is re-read before every send; the whole call stops
    /// silently when the record disappears mid-loop. Alerts whose channel
    /// no longer resolves are skipped individually.
    pub async fn send_offer_alert(
        &self,
        user_id: &str,
        alerts: &[Alert],
        expires_at: DateTime<Utc>,
    ) -> Result<(), SendError> {
        debug!(user_id, count = alerts.len(), "sending offer alerts");

        for alert in alerts {
            let Some(user) = self.store.user(user_id).await? else {
                // deleted while we were sending
                return Ok(());
            };

            let Some(channel) = self.resolve_channel(&alert.channel_id).await else {
                continue;
            };

            let item = self.catalog.item(&alert.item_id).await?;

            let message = OutboundMessage {
                content: Some(mention(user_id)),
                embeds: vec![Embed {
                    description: self
                        .text
                        .offer_alert(&user.locale, user_id, &item.name, expires_at),
                    color: ALERT_COLOR,
                    thumbnail_url: Some(item.icon_url.clone()),
                }],
                actions: vec![MessageAction::RemoveAlert {
                    user_id: user_id.to_string(),
                    item_id: alert.item_id.clone(),
                    label: self.text.remove_alert_label(&user.locale),
                }],
            };

            if let Err(e) = self.chat.send(&channel.id, message).await {
                error!(channel = %channel.name, error = %e, "could not deliver offer alert");
                self.notify_operator(user_id, &format!("the {} is in their item shop", item.name))
                    .await;
            }
        }

        Ok(())
    }

    /// Tell a user their stored credentials no longer work.
    ///
    /// Skips silently when the user left the channel's guild or the
    /// record is already gone; there is nobody left to tell.
    pub async fn send_credentials_expired(
        &self,
        user_id: &str,
        alert: &Alert,
    ) -> Result<(), SendError> {
        const WHAT: &str = "their credentials have expired and they need to log in again";

        let Some(channel) = self.resolve_channel(&alert.channel_id).await else {
            self.notify_operator(user_id, WHAT).await;
            return Ok(());
        };

        if let Some(guild_id) = channel.guild_id.as_deref() {
            let member = self.chat.is_member(guild_id, user_id).await.unwrap_or(false);
            if !member {
                debug!(user_id, guild_id, "user left the guild, skipping expiry notice");
                return Ok(());
            }
        }

        let Some(user) = self.store.user(user_id).await? else {
            return Ok(());
        };

        let message = OutboundMessage {
            content: Some(mention(user_id)),
            embeds: vec![Embed {
                description: self.text.credentials_expired(&user.locale, user_id),
                color: ALERT_COLOR,
                thumbnail_url: None,
            }],
            actions: vec![],
        };

        if let Err(e) = self.chat.send(&channel.id, message).await {
            error!(channel = %channel.name, error = %e, "could not deliver expiry notice");
            self.notify_operator(user_id, WHAT).await;
        }

        Ok(())
    }

    /// Send a canned test message to the origin channel. Returns whether
    /// delivery succeeded.
    pub async fn send_test_alert(&self, origin: &CommandOrigin) -> bool {
        let channel = match self.chat.channel(&origin.channel_id).await {
            Ok(Some(channel)) => channel,
            Ok(None) | Err(_) => {
                warn!(channel_id = %origin.channel_id, "test alert channel is unreachable");
                return false;
            }
        };

        let message = OutboundMessage {
            content: None,
            embeds: vec![Embed {
                description: self.text.test_alert(&origin.locale),
                color: ALERT_COLOR,
                thumbnail_url: None,
            }],
            actions: vec![],
        };

        match self.chat.send(&channel.id, message).await {
            Ok(()) => true,
            Err(ChatError::MissingAccess) => {
                error!(channel = %channel.name, "test alert failed: missing access");
                false
            }
            Err(ChatError::MissingPermissions) => {
                error!(channel = %channel.name, "test alert failed: missing permissions");
                false
            }
            Err(e) => {
                error!(channel = %channel.name, error = %e, "test alert failed");
                false
            }
        }
    }

    /// Resolve a channel, folding lookup failures into absence. A channel
    /// the bot cannot see is a channel it cannot deliver to either way.
    async fn resolve_channel(&self, channel_id: &str) -> Option<Channel> {
        match self.chat.channel(channel_id).await {
            Ok(Some(channel)) => Some(channel),
            Ok(None) => {
                warn!(channel_id, "alert channel no longer resolves");
                None
            }
            Err(e) => {
                warn!(channel_id, error = %e, "alert channel lookup failed");
                None
            }
        }
    }

    /// Operator fallback when a delivery cannot happen: resolve the
    /// user's tag and log the manual instruction, degrading to an
    /// id-only line when even that lookup fails.
    async fn notify_operator(&self, user_id: &str, what: &str) {
        match self.chat.user(user_id).await {
            Ok(Some(user)) => error!(user = %user.tag, "please tell them manually: {what}"),
            Ok(None) | Err(_) => error!(user_id, "please notify the user manually: {what}"),
        }
    }
}
