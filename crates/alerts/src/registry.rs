//! Alert registry: CRUD over each user's watched items.

use std::sync::Arc;

use tracing::debug;

use crate::entities::Alert;
use crate::errors::StoreError;
use crate::storage::UserStore;

/// CRUD surface over the per-user alert sets in the user store.
///
/// Cheap to clone; shares the underlying store handle.
#[derive(Clone)]
pub struct AlertRegistry {
    store: Arc<dyn UserStore>,
}

impl AlertRegistry {
    #[must_use]
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Register an alert for a user and persist the record.
    ///
    /// Silent no-op when the user has no record, and when the user
    /// already watches the item: each user holds at most one alert per
    /// distinct item.
    pub async fn add_alert(&self, user_id: &str, alert: Alert) -> Result<(), StoreError> {
        let Some(mut user) = self.store.user(user_id).await? else {
            debug!(user_id, "ignoring alert for unknown user");
            return Ok(());
        };

        if user.alerts.iter().any(|a| a.item_id == alert.item_id) {
            debug!(user_id, item_id = %alert.item_id, "item already watched");
            return Ok(());
        }

        user.alerts.push(alert);
        self.store.save_user(&user).await
    }

    /// All alerts for a user. Fails with [`StoreError::UserNotFound`]
    /// when the user has no record.
    pub async fn alerts_for_user(&self, user_id: &str) -> Result<Vec<Alert>, StoreError> {
        let user = self
            .store
            .user(user_id)
            .await?
            .ok_or_else(|| StoreError::UserNotFound {
                id: user_id.to_string(),
            })?;
        Ok(user.alerts)
    }

    /// First alert watching the given item, if any.
    pub async fn alert_exists(
        &self,
        user_id: &str,
        item_id: &str,
    ) -> Result<Option<Alert>, StoreError> {
        Ok(self
            .alerts_for_user(user_id)
            .await?
            .into_iter()
            .find(|a| a.item_id == item_id))
    }

    /// Remove every alert watching the given item and persist the record.
    /// Returns whether the user's alert set shrank.
    pub async fn remove_alert(&self, user_id: &str, item_id: &str) -> Result<bool, StoreError> {
        let mut user = self
            .store
            .user(user_id)
            .await?
            .ok_or_else(|| StoreError::UserNotFound {
                id: user_id.to_string(),
            })?;

        let before = user.alerts.len();
        user.alerts.retain(|a| a.item_id != item_id);
        self.store.save_user(&user).await?;

        Ok(user.alerts.len() < before)
    }
}
