//! Notification cycle engine: the periodic pass over all subscribers.
//!
//! One [`AlertCycle::run`] call walks every stored user in order, fetches
//! their current shop offers, and delivers alerts for watched items that
//! rotated in. The pass is strictly sequential with a pacing gap between
//! users; concurrency here would trip platform rate limits for no gain.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::delivery::AlertSender;
use crate::entities::Alert;
use crate::errors::CycleError;
use crate::pace::{FixedDelay, Pacer};
use crate::shop::{OfferResponse, OfferSource};
use crate::storage::UserStore;

/// Cycle engine configuration.
#[derive(Debug, Clone)]
pub struct CycleConfig {
    /// Gap awaited between users, throttling shop and chat traffic.
    pub delay_between_users: Duration,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            delay_between_users: Duration::from_secs(5),
        }
    }
}

/// What happened for one user within a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
enum UserOutcome {
    /// Nothing watched; skipped without any shop traffic.
    NoAlerts,
    /// The shop is down; the whole cycle stops here.
    Maintenance,
    /// Stored credentials were rejected; the user was notified and
    /// removed.
    CredentialsExpired,
    /// Watched items are on offer; this many alerts were delivered.
    Notified(usize),
    /// Offers fetched, nothing watched is on offer.
    NoMatches,
}

/// Sequential batch engine: one pass over every subscriber.
pub struct AlertCycle {
    store: Arc<dyn UserStore>,
    shop: Arc<dyn OfferSource>,
    sender: AlertSender,
    pacer: Arc<dyn Pacer>,
}

impl AlertCycle {
    /// Build a cycle with the production fixed-delay pacer.
    #[must_use]
    pub fn new(
        store: Arc<dyn UserStore>,
        shop: Arc<dyn OfferSource>,
        sender: AlertSender,
        config: CycleConfig,
    ) -> Self {
        Self::with_pacer(
            store,
            shop,
            sender,
            Arc::new(FixedDelay::new(config.delay_between_users)),
        )
    }

    /// Build a cycle with a custom pacer, e.g. [`crate::pace::NoDelay`]
    /// in tests.
    #[must_use]
    pub fn with_pacer(
        store: Arc<dyn UserStore>,
        shop: Arc<dyn OfferSource>,
        sender: AlertSender,
        pacer: Arc<dyn Pacer>,
    ) -> Self {
        Self {
            store,
            shop,
            sender,
            pacer,
        }
    }

    /// Run one full pass over every stored user.
    ///
    /// Never fails: per-user faults are logged and the pass moves on;
    /// only a shop maintenance signal stops it early, to be retried on
    /// the next scheduled invocation. Self-reports through logs only.
    pub async fn run(&self) {
        info!("checking shop offers for alerts");

        let user_ids = match self.store.user_ids().await {
            Ok(ids) => ids,
            Err(e) => {
                error!(error = %e, "could not list users, skipping cycle");
                return;
            }
        };

        let mut notified = 0usize;
        let mut expired = 0usize;
        let mut errored = 0usize;

        for user_id in &user_ids {
            match self.process_user(user_id).await {
                Ok(UserOutcome::NoAlerts) => {
                    // no shop traffic happened, so no pacing is owed
                    continue;
                }
                Ok(UserOutcome::Maintenance) => {
                    warn!("shop is under maintenance, aborting cycle");
                    return;
                }
                Ok(UserOutcome::CredentialsExpired) => expired += 1,
                Ok(UserOutcome::Notified(count)) => notified += count,
                Ok(UserOutcome::NoMatches) => {}
                Err(e) => {
                    error!(user_id = %user_id, error = %e, "failed to check alerts for user");
                    errored += 1;
                }
            }

            self.pacer.pause().await;
        }

        info!(
            users = user_ids.len(),
            notified, expired, errored, "alert cycle complete"
        );
    }

    /// Handle a single user. Every error this returns is isolated to the
    /// user by the caller.
    async fn process_user(&self, user_id: &str) -> Result<UserOutcome, CycleError> {
        let Some(user) = self.store.user(user_id).await? else {
            // raced with a deletion between listing and processing
            debug!(user_id, "user vanished since listing, skipping");
            return Ok(UserOutcome::NoAlerts);
        };

        if user.alerts.is_empty() {
            return Ok(UserOutcome::NoAlerts);
        }

        match self.shop.offers(user_id).await? {
            OfferResponse::Maintenance => Ok(UserOutcome::Maintenance),
            OfferResponse::CredentialsExpired => {
                self.expire_user(user_id, &user.alerts).await?;
                Ok(UserOutcome::CredentialsExpired)
            }
            OfferResponse::Offers(batch) => {
                let positive: Vec<Alert> = user
                    .alerts
                    .iter()
                    .filter(|alert| batch.item_ids.contains(&alert.item_id))
                    .cloned()
                    .collect();

                if positive.is_empty() {
                    return Ok(UserOutcome::NoMatches);
                }

                let count = positive.len();
                self.sender
                    .send_offer_alert(user_id, &positive, batch.expires_at)
                    .await?;
                Ok(UserOutcome::Notified(count))
            }
        }
    }

    /// Credentials-expired teardown: one notice per distinct channel,
    /// then drop the user record and the alert set it owns.
    async fn expire_user(&self, user_id: &str, alerts: &[Alert]) -> Result<(), CycleError> {
        info!(user_id, "credentials rejected, notifying and removing user");

        let mut seen = HashSet::new();
        for alert in alerts {
            if seen.insert(alert.channel_id.as_str()) {
                self.sender.send_credentials_expired(user_id, alert).await?;
            }
        }

        self.store.delete_user(user_id).await?;
        Ok(())
    }
}
