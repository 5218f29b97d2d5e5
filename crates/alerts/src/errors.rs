//! Error types for the alert subsystem.

use thiserror::Error;

/// Errors raised by user store adapters.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record exists for the requested user.
    #[error("no user record for {id}")]
    UserNotFound { id: String },

    /// Underlying file IO failed.
    #[error("store IO failed: {0}")]
    Io(#[from] std::io::Error),

    /// The stored document could not be read or written as JSON.
    #[error("store serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Any other backend failure. Reserved for external store
    /// implementations; the bundled adapters never produce it.
    #[error("{0}")]
    Backend(String),
}

/// Errors raised by the chat platform client.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The bot cannot see the target channel.
    #[error("missing access to channel")]
    MissingAccess,

    /// The bot can see the channel but may not post in it.
    #[error("missing permissions in channel")]
    MissingPermissions,

    /// Transport-level failure.
    #[error("chat transport failed: {0}")]
    Transport(String),
}

/// Errors raised by the shop offer source.
///
/// Credential and maintenance conditions are data, not errors — see
/// [`crate::shop::OfferResponse`].
#[derive(Debug, Error)]
pub enum ShopError {
    /// Transport-level failure.
    #[error("offer fetch failed: {0}")]
    Transport(String),
}

/// Errors raised by the item metadata source.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The item id is unknown to the catalog.
    #[error("unknown item {id}")]
    NotFound { id: String },

    /// Transport-level failure.
    #[error("catalog fetch failed: {0}")]
    Transport(String),
}

/// Failures that may escape a delivery sender.
///
/// Transmission failures never surface here: the senders log and swallow
/// them. What does surface is the unexpected kind — the store or the
/// catalog misbehaving mid-send — which the cycle catches at its per-user
/// boundary.
#[derive(Debug, Error)]
pub enum SendError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Anything that can interrupt processing of a single user inside the
/// notification cycle. Caught and logged at the per-user boundary; never
/// propagated past it.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Shop(#[from] ShopError),

    #[error(transparent)]
    Send(#[from] SendError),
}
