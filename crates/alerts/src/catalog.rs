//! Item metadata contract.

use async_trait::async_trait;

use crate::errors::CatalogError;

/// Display metadata for a shop item.
#[derive(Debug, Clone)]
pub struct ItemInfo {
    pub name: String,
    pub icon_url: String,
}

/// Source of item display metadata.
#[async_trait]
pub trait ItemCatalog: Send + Sync {
    /// Look up display metadata for an item.
    async fn item(&self, item_id: &str) -> Result<ItemInfo, CatalogError>;
}
