//! Core data types for the alert subsystem.

use serde::{Deserialize, Serialize};

/// A user's subscription binding a watched shop item to the channel the
/// notification should land in.
///
/// Each user holds at most one alert per distinct `item_id`; the registry
/// enforces this on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Opaque id of the watched shop item.
    pub item_id: String,
    /// Channel the alert was registered in and will be delivered to.
    pub channel_id: String,
}

impl Alert {
    /// Create an alert binding an item to a delivery channel.
    #[must_use]
    pub fn new(item_id: impl Into<String>, channel_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            channel_id: channel_id.into(),
        }
    }
}

/// A stored user record.
///
/// Owns the user's alert set: the set is created empty when the user first
/// registers and destroyed with the record, e.g. when stored credentials
/// are invalidated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Chat-platform user id.
    pub id: String,
    /// Locale tag used when formatting messages for this user.
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Watched items.
    #[serde(default)]
    pub alerts: Vec<Alert>,
}

impl UserRecord {
    /// Create an empty record for a newly registered user.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            locale: default_locale(),
            alerts: Vec::new(),
        }
    }
}

fn default_locale() -> String {
    "en-US".to_string()
}

/// Where a command was invoked from.
///
/// Used by the prioritizer to rank alerts by relevance and by the test
/// sender to address its message.
#[derive(Debug, Clone)]
pub struct CommandOrigin {
    /// Channel the command came from.
    pub channel_id: String,
    /// Guild the channel belongs to, `None` for DMs.
    pub guild_id: Option<String>,
    /// Locale of the invoking user.
    pub locale: String,
}
