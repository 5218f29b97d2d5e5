//! JSON-file-backed user store.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use super::traits::UserStore;
use crate::entities::UserRecord;
use crate::errors::StoreError;

/// File-backed store keeping every user record in a single JSON document.
///
/// The document is a `{user id: record}` object, read and rewritten whole
/// on every mutation. A missing file reads as an empty store. Suited to
/// the small subscriber counts a single bot instance carries; anything
/// bigger belongs behind a real database adapter.
pub struct FileUserStore {
    path: PathBuf,
}

impl FileUserStore {
    /// Create a store over the given document path. The file is created
    /// on first write.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    async fn read_all(&self) -> Result<HashMap<String, UserRecord>, StoreError> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    async fn write_all(&self, users: &HashMap<String, UserRecord>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(users)?;
        fs::write(&self.path, content).await?;
        Ok(())
    }
}

#[async_trait]
impl UserStore for FileUserStore {
    async fn user(&self, id: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.read_all().await?.remove(id))
    }

    async fn user_ids(&self) -> Result<Vec<String>, StoreError> {
        // JSON objects carry no reliable ordering; sort so cycles walk
        // users in a deterministic order.
        let mut ids: Vec<String> = self.read_all().await?.into_keys().collect();
        ids.sort();
        Ok(ids)
    }

    async fn save_user(&self, user: &UserRecord) -> Result<(), StoreError> {
        let mut users = self.read_all().await?;
        users.insert(user.id.clone(), user.clone());
        self.write_all(&users).await
    }

    async fn delete_user(&self, id: &str) -> Result<(), StoreError> {
        let mut users = self.read_all().await?;
        if users.remove(id).is_some() {
            self.write_all(&users).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Alert;

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileUserStore::new(dir.path().join("users.json"));
        assert!(store.user_ids().await.unwrap().is_empty());
        assert!(store.user("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");

        let mut user = UserRecord::new("u1");
        user.alerts.push(Alert::new("item-a", "chan-1"));
        FileUserStore::new(&path).save_user(&user).await.unwrap();

        // a fresh store over the same path sees the persisted record
        let reloaded = FileUserStore::new(&path)
            .user("u1")
            .await
            .unwrap()
            .expect("record should persist");
        assert_eq!(reloaded, user);
    }

    #[tokio::test]
    async fn delete_removes_record_and_alerts() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileUserStore::new(dir.path().join("users.json"));

        store.save_user(&UserRecord::new("u1")).await.unwrap();
        store.save_user(&UserRecord::new("u2")).await.unwrap();
        store.delete_user("u1").await.unwrap();

        assert!(store.user("u1").await.unwrap().is_none());
        assert_eq!(store.user_ids().await.unwrap(), vec!["u2".to_string()]);
    }
}
