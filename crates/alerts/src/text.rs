//! Localized message text.

use chrono::{DateTime, Utc};

/// Localized message catalog consumed by the delivery senders.
///
/// Formatting is pure; implementations hold their string tables in
/// memory. Timestamps are rendered in the chat platform's relative
/// markup so the client localizes them for the reader.
pub trait MessageText: Send + Sync {
    /// Body of an "item available" alert.
    fn offer_alert(
        &self,
        locale: &str,
        user_id: &str,
        item_name: &str,
        expires_at: DateTime<Utc>,
    ) -> String;

    /// Body of a "credentials expired" notice.
    fn credentials_expired(&self, locale: &str, user_id: &str) -> String;

    /// Label of the remove-alert button.
    fn remove_alert_label(&self, locale: &str) -> String;

    /// Body of the ad-hoc test message.
    fn test_alert(&self, locale: &str) -> String;
}

/// Built-in English catalog. Ignores the locale tag.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnglishText;

impl MessageText for EnglishText {
    fn offer_alert(
        &self,
        _locale: &str,
        user_id: &str,
        item_name: &str,
        expires_at: DateTime<Utc>,
    ) -> String {
        format!(
            "Hey <@{user_id}>! The **{item_name}** is in your item shop! It leaves <t:{}:R>.",
            expires_at.timestamp()
        )
    }

    fn credentials_expired(&self, _locale: &str, user_id: &str) -> String {
        format!(
            "Hey <@{user_id}>, your stored credentials have expired! \
             Log in again to keep receiving shop alerts."
        )
    }

    fn remove_alert_label(&self, _locale: &str) -> String {
        "Remove Alert".to_string()
    }

    fn test_alert(&self, _locale: &str) -> String {
        "Alerts are working! This is a test message.".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn offer_alert_names_item_and_expiry() {
        let expires = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let body = EnglishText.offer_alert("en-US", "u1", "Prime Blade", expires);
        assert!(body.contains("<@u1>"));
        assert!(body.contains("Prime Blade"));
        assert!(body.contains(&format!("<t:{}:R>", expires.timestamp())));
    }

    #[test]
    fn credentials_expired_mentions_user() {
        let body = EnglishText.credentials_expired("en-US", "u1");
        assert!(body.contains("<@u1>"));
        assert!(body.contains("expired"));
    }
}
