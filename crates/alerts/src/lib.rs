#![warn(clippy::pedantic)]
// Allow common pedantic lints that don't affect correctness
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]

//! # alerts
//!
//! Per-user shop alert subsystem for the shopwatch bot.
//!
//! Users watch items in the rotating shop catalog; a periodic cycle
//! checks every subscriber's current offers and pings them in the
//! channel they registered the alert in when a watched item appears.
//!
//! This crate provides:
//! - Alert registry: per-user CRUD over watched items
//! - Notification cycle engine: the sequential, paced batch pass
//! - Delivery senders: offer, credentials-expired, and test messages
//! - Relevance ordering and per-guild aggregates for command handlers
//!
//! The chat platform, the shop, and item metadata are consumed through
//! traits; nothing in here talks to a network directly.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use alerts::{
//!     AlertCycle, AlertRegistry, AlertSender, CycleConfig, EnglishText, FileUserStore,
//! };
//!
//! let store = Arc::new(FileUserStore::new("data/users.json"));
//! let registry = AlertRegistry::new(store.clone());
//! let sender = AlertSender::new(store.clone(), chat, catalog, Arc::new(EnglishText));
//! let cycle = AlertCycle::new(store, shop, sender, CycleConfig::default());
//!
//! // invoked periodically by the bot's scheduler
//! cycle.run().await;
//! ```

// Core entities
pub mod entities;

// Error types
pub mod errors;

// Storage layer
pub mod storage;

// Collaborator contracts
pub mod catalog;
pub mod chat;
pub mod shop;
pub mod text;

// Alert components
pub mod cycle;
pub mod delivery;
pub mod pace;
pub mod priority;
pub mod registry;
pub mod report;

// Re-export key types for convenience
pub use catalog::{ItemCatalog, ItemInfo};
pub use chat::{
    mention, ChatClient, ChatUser, Channel, Embed, MessageAction, OutboundMessage, ALERT_COLOR,
};
pub use cycle::{AlertCycle, CycleConfig};
pub use delivery::AlertSender;
pub use entities::{Alert, CommandOrigin, UserRecord};
pub use errors::{CatalogError, ChatError, CycleError, SendError, ShopError, StoreError};
pub use pace::{FixedDelay, NoDelay, Pacer};
pub use priority::AlertPrioritizer;
pub use registry::AlertRegistry;
pub use report::{AggregateReporter, AlertAggregate, DM_COMMUNITY};
pub use shop::{OfferBatch, OfferResponse, OfferSource};
pub use storage::{FileUserStore, MemoryUserStore, UserStore};
pub use text::{EnglishText, MessageText};
