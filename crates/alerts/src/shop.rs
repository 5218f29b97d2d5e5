//! Shop offer source contract.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::ShopError;

/// One user's current shop rotation.
#[derive(Debug, Clone)]
pub struct OfferBatch {
    /// Item ids currently on offer for this user.
    pub item_ids: HashSet<String>,
    /// When the rotation rolls over.
    pub expires_at: DateTime<Utc>,
}

/// Result of querying the shop for a single user.
///
/// Consumed once per cycle iteration, then discarded; never persisted.
#[derive(Debug, Clone)]
pub enum OfferResponse {
    /// The shop answered with the user's current offers.
    Offers(OfferBatch),
    /// The shop rejected the user's stored credentials.
    CredentialsExpired,
    /// The shop is down for maintenance. Affects every user identically,
    /// so the cycle stops rather than burning through the rest of the
    /// list.
    Maintenance,
}

/// Source of per-user shop offers.
#[async_trait]
pub trait OfferSource: Send + Sync {
    /// Fetch the current offers for one user.
    ///
    /// Credential and maintenance conditions are data
    /// ([`OfferResponse`]), not errors; `Err` is reserved for transport
    /// failure.
    async fn offers(&self, user_id: &str) -> Result<OfferResponse, ShopError>;
}
