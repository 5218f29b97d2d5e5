//! In-memory user store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::traits::UserStore;
use crate::entities::UserRecord;
use crate::errors::StoreError;

/// In-memory store behind an async `RwLock`, for tests and embedding.
///
/// `user_ids` preserves insertion order, so cycles walk users in the
/// order they registered.
#[derive(Default)]
pub struct MemoryUserStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    users: HashMap<String, UserRecord>,
    order: Vec<String>,
}

impl MemoryUserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-seeded with records, in iteration order.
    #[must_use]
    pub fn with_users(users: impl IntoIterator<Item = UserRecord>) -> Self {
        let mut inner = Inner::default();
        for user in users {
            inner.order.push(user.id.clone());
            inner.users.insert(user.id.clone(), user);
        }
        Self {
            inner: RwLock::new(inner),
        }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn user(&self, id: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.inner.read().await.users.get(id).cloned())
    }

    async fn user_ids(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.inner.read().await.order.clone())
    }

    async fn save_user(&self, user: &UserRecord) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        if !inner.users.contains_key(&user.id) {
            inner.order.push(user.id.clone());
        }
        inner.users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn delete_user(&self, id: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner.users.remove(id);
        inner.order.retain(|existing| existing != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ids_keep_insertion_order() {
        let store = MemoryUserStore::new();
        for id in ["c", "a", "b"] {
            store.save_user(&UserRecord::new(id)).await.unwrap();
        }
        assert_eq!(store.user_ids().await.unwrap(), vec!["c", "a", "b"]);

        // re-saving must not duplicate the id
        store.save_user(&UserRecord::new("a")).await.unwrap();
        assert_eq!(store.user_ids().await.unwrap(), vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn delete_is_a_noop_for_unknown_ids() {
        let store = MemoryUserStore::new();
        store.save_user(&UserRecord::new("u1")).await.unwrap();
        store.delete_user("ghost").await.unwrap();
        assert_eq!(store.user_ids().await.unwrap(), vec!["u1"]);
    }
}
