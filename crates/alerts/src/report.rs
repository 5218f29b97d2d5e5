//! Per-guild alert distribution for admin views.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::chat::ChatClient;
use crate::errors::StoreError;
use crate::storage::UserStore;

/// Nested `guild id -> channel id -> alert count` mapping.
pub type AlertAggregate = HashMap<String, HashMap<String, u64>>;

/// Community key used for channels that belong to no guild.
pub const DM_COMMUNITY: &str = "dm";

/// Builds the per-guild, per-channel alert distribution across every
/// stored user.
///
/// Resolves every alert's channel individually and sequentially. Fine at
/// the admin-view scale this serves; a large alert population would want
/// the lookups batched and cached.
pub struct AggregateReporter {
    store: Arc<dyn UserStore>,
    chat: Arc<dyn ChatClient>,
}

impl AggregateReporter {
    #[must_use]
    pub fn new(store: Arc<dyn UserStore>, chat: Arc<dyn ChatClient>) -> Self {
        Self { store, chat }
    }

    /// Count alerts per guild and channel.
    ///
    /// Built fresh on every call; nothing is cached. Alerts whose channel
    /// no longer resolves are skipped.
    pub async fn build(&self) -> Result<AlertAggregate, StoreError> {
        let mut aggregate = AlertAggregate::new();

        for id in self.store.user_ids().await? {
            let Some(user) = self.store.user(&id).await? else {
                continue;
            };

            for alert in &user.alerts {
                let channel = match self.chat.channel(&alert.channel_id).await {
                    Ok(Some(channel)) => channel,
                    Ok(None) | Err(_) => {
                        debug!(channel_id = %alert.channel_id, "skipping unresolvable alert channel");
                        continue;
                    }
                };

                let guild = channel
                    .guild_id
                    .unwrap_or_else(|| DM_COMMUNITY.to_string());
                *aggregate
                    .entry(guild)
                    .or_default()
                    .entry(channel.id)
                    .or_default() += 1;
            }
        }

        Ok(aggregate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{Channel, ChatUser, OutboundMessage};
    use crate::entities::{Alert, UserRecord};
    use crate::errors::ChatError;
    use crate::storage::MemoryUserStore;
    use async_trait::async_trait;

    /// Chat double: channels named `g:<guild>:<n>` resolve to that guild,
    /// `dm:<n>` resolves guildless, anything else is missing.
    struct NamedChannels;

    #[async_trait]
    impl ChatClient for NamedChannels {
        async fn channel(&self, channel_id: &str) -> Result<Option<Channel>, ChatError> {
            let guild_id = if let Some(rest) = channel_id.strip_prefix("g:") {
                Some(rest.split(':').next().unwrap_or_default().to_string())
            } else if channel_id.starts_with("dm:") {
                None
            } else {
                return Ok(None);
            };
            Ok(Some(Channel {
                id: channel_id.to_string(),
                name: channel_id.to_string(),
                guild_id,
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

    fn user(id: &str, alerts: &[(&str, &str)]) -> UserRecord {
        let mut user = UserRecord::new(id);
        user.alerts = alerts
            .iter()
            .map(|(item, chan)| Alert::new(*item, *chan))
            .collect();
        user
    }

    #[tokio::test]
    async fn counts_alerts_per_guild_and_channel() {
        let store = Arc::new(MemoryUserStore::with_users(vec![
            user("u1", &[("i1", "g:g1:general"), ("i2", "g:g1:general")]),
            user("u2", &[("i1", "g:g1:general"), ("i3", "g:g2:lobby")]),
        ]));
        let reporter = AggregateReporter::new(store, Arc::new(NamedChannels));

        let aggregate = reporter.build().await.unwrap();
        assert_eq!(aggregate["g1"]["g:g1:general"], 3);
        assert_eq!(aggregate["g2"]["g:g2:lobby"], 1);
    }

    #[tokio::test]
    async fn dead_channels_are_skipped_and_dms_bucketed() {
        let store = Arc::new(MemoryUserStore::with_users(vec![user(
            "u1",
            &[("i1", "deleted-channel"), ("i2", "dm:u1")],
        )]));
        let reporter = AggregateReporter::new(store, Arc::new(NamedChannels));

        let aggregate = reporter.build().await.unwrap();
        assert_eq!(aggregate.len(), 1);
        assert_eq!(aggregate[DM_COMMUNITY]["dm:u1"], 1);
    }
}
