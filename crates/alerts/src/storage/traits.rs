//! User store contract.

use async_trait::async_trait;

use crate::entities::UserRecord;
use crate::errors::StoreError;

/// Persistence seam for user records.
///
/// The registry and the cycle engine only ever talk to this trait;
/// adapters decide where records actually live. Writes are
/// last-write-wins: command handlers racing an in-flight cycle are
/// tolerated rather than serialized.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch a single user record.
    async fn user(&self, id: &str) -> Result<Option<UserRecord>, StoreError>;

    /// List the ids of every stored user, in the order the cycle should
    /// walk them.
    async fn user_ids(&self) -> Result<Vec<String>, StoreError>;

    /// Persist a record, replacing any existing record with the same id.
    async fn save_user(&self, user: &UserRecord) -> Result<(), StoreError>;

    /// Remove a record and the alert set it owns. No-op for unknown ids.
    async fn delete_user(&self, id: &str) -> Result<(), StoreError>;
}
