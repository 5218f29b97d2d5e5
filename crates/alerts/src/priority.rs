//! Relevance ordering of a user's alerts.

use std::cmp::Reverse;
use std::sync::Arc;

use crate::chat::ChatClient;
use crate::entities::{Alert, CommandOrigin};
use crate::errors::StoreError;
use crate::storage::UserStore;

/// Orders a user's alerts by relevance to the place a command came from:
/// alerts for the invoking channel first, then other channels of the same
/// guild, then everything else.
pub struct AlertPrioritizer {
    store: Arc<dyn UserStore>,
    chat: Arc<dyn ChatClient>,
}

impl AlertPrioritizer {
    #[must_use]
    pub fn new(store: Arc<dyn UserStore>, chat: Arc<dyn ChatClient>) -> Self {
        Self { store, chat }
    }

    /// The user's alerts, most relevant first. Ties keep their stored
    /// order. Fails with [`StoreError::UserNotFound`] when the user has
    /// no record.
    pub async fn prioritize(
        &self,
        user_id: &str,
        origin: &CommandOrigin,
    ) -> Result<Vec<Alert>, StoreError> {
        let user = self
            .store
            .user(user_id)
            .await?
            .ok_or_else(|| StoreError::UserNotFound {
                id: user_id.to_string(),
            })?;

        let mut scored = Vec::with_capacity(user.alerts.len());
        for alert in user.alerts {
            let score = self.relevance(&alert, origin).await;
            scored.push((score, alert));
        }

        // sort_by_key is stable, so equal scores keep their stored order
        scored.sort_by_key(|(score, _)| Reverse(*score));

        Ok(scored.into_iter().map(|(_, alert)| alert).collect())
    }

    /// 3-tier relevance: 2 for the invoking channel, 1 for a sibling
    /// channel in the invoking guild, 0 otherwise. Channels that no
    /// longer resolve score 0.
    async fn relevance(&self, alert: &Alert, origin: &CommandOrigin) -> u8 {
        if alert.channel_id == origin.channel_id {
            return 2;
        }

        let Some(guild_id) = origin.guild_id.as_deref() else {
            return 0;
        };

        match self.chat.channel(&alert.channel_id).await {
            Ok(Some(channel)) if channel.guild_id.as_deref() == Some(guild_id) => 1,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{Channel, ChatUser, OutboundMessage};
    use crate::entities::UserRecord;
    use crate::errors::ChatError;
    use crate::storage::MemoryUserStore;
    use async_trait::async_trait;
    use std::collections::HashMap;

    /// Chat double that only knows which guild each channel lives in.
    struct GuildMap(HashMap<String, String>);

    #[async_trait]
    impl ChatClient for GuildMap {
        async fn channel(&self, channel_id: &str) -> Result<Option<Channel>, ChatError> {
            Ok(self.0.get(channel_id).map(|guild| Channel {
                id: channel_id.to_string(),
                name: channel_id.to_string(),
                guild_id: Some(guild.clone()),
            }))
        }

        async fn user(&self, _user_id: &str) -> Result<Option<ChatUser>, ChatError> {
            Ok(None)
        }

        async fn is_member(&self, _guild_id: &str, _user_id: &str) -> Result<bool, ChatError> {
            Ok(true)
        }

        async fn send(&self, _channel_id: &str, _message: OutboundMessage) -> Result<(), ChatError> {
            Ok(())
        }
    }

    fn prioritizer(alerts: Vec<Alert>, guilds: &[(&str, &str)]) -> AlertPrioritizer {
        let mut user = UserRecord::new("u1");
        user.alerts = alerts;
        let store = Arc::new(MemoryUserStore::with_users(vec![user]));
        let chat = Arc::new(GuildMap(
            guilds
                .iter()
                .map(|(c, g)| ((*c).to_string(), (*g).to_string()))
                .collect(),
        ));
        AlertPrioritizer::new(store, chat)
    }

    #[tokio::test]
    async fn same_channel_then_same_guild_then_rest() {
        let prioritizer = prioritizer(
            vec![
                Alert::new("i1", "elsewhere"),
                Alert::new("i2", "here"),
                Alert::new("i3", "sibling"),
            ],
            &[("here", "g1"), ("sibling", "g1"), ("elsewhere", "g2")],
        );

        let origin = CommandOrigin {
            channel_id: "here".to_string(),
            guild_id: Some("g1".to_string()),
            locale: "en-US".to_string(),
        };

        let ordered = prioritizer.prioritize("u1", &origin).await.unwrap();
        let channels: Vec<&str> = ordered.iter().map(|a| a.channel_id.as_str()).collect();
        assert_eq!(channels, vec!["here", "sibling", "elsewhere"]);
    }

    #[tokio::test]
    async fn ties_keep_stored_order() {
        let prioritizer = prioritizer(
            vec![
                Alert::new("i1", "far-1"),
                Alert::new("i2", "far-2"),
                Alert::new("i3", "far-3"),
            ],
            &[("far-1", "g9"), ("far-2", "g9"), ("far-3", "g9")],
        );

        let origin = CommandOrigin {
            channel_id: "here".to_string(),
            guild_id: Some("g1".to_string()),
            locale: "en-US".to_string(),
        };

        let ordered = prioritizer.prioritize("u1", &origin).await.unwrap();
        let items: Vec<&str> = ordered.iter().map(|a| a.item_id.as_str()).collect();
        assert_eq!(items, vec!["i1", "i2", "i3"]);
    }

    #[tokio::test]
    async fn dm_origin_scores_everything_equal() {
        let prioritizer = prioritizer(
            vec![Alert::new("i1", "far-1"), Alert::new("i2", "here")],
            &[("far-1", "g1"), ("here", "g1")],
        );

        let origin = CommandOrigin {
            channel_id: "here".to_string(),
            guild_id: None,
            locale: "en-US".to_string(),
        };

        // the invoking channel still wins; guild scoring is off in DMs
        let ordered = prioritizer.prioritize("u1", &origin).await.unwrap();
        let items: Vec<&str> = ordered.iter().map(|a| a.item_id.as_str()).collect();
        assert_eq!(items, vec!["i2", "i1"]);
    }
}
