//! In-memory stores backing the integration tests. Same contract as the
//! MySQL implementations, state behind `RwLock` maps.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use super::{AssetStore, TaskStore, TokenStore, UserStore};
use crate::models::task::{NewTask, Task};
use crate::models::user::{NewUser, User};

pub struct MemoryTaskStore {
    tasks: RwLock<BTreeMap<u64, Task>>,
    next_id: AtomicU64,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self {
            tasks: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn insert(&self, new: NewTask) -> Result<Task> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let task = Task {
            id,
            title: new.title,
            description: new.description,
            due_date: new.due_date,
            image: new.image,
            completed: false,
            is_private: new.is_private,
            user_id: new.user_id,
        };
        self.tasks
            .write()
            .map_err(|_| anyhow!("task store lock poisoned"))?
            .insert(id, task.clone());
        Ok(task)
    }

    async fn get(&self, id: u64) -> Result<Option<Task>> {
        let tasks = self
            .tasks
            .read()
            .map_err(|_| anyhow!("task store lock poisoned"))?;
        Ok(tasks.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Task>> {
        let tasks = self
            .tasks
            .read()
            .map_err(|_| anyhow!("task store lock poisoned"))?;
        Ok(tasks.values().cloned().collect())
    }

    async fn update(&self, task: &Task) -> Result<()> {
        let mut tasks = self
            .tasks
            .write()
            .map_err(|_| anyhow!("task store lock poisoned"))?;
        if let Some(existing) = tasks.get_mut(&task.id) {
            existing.title = task.title.clone();
            existing.description = task.description.clone();
            existing.due_date = task.due_date;
            existing.image = task.image.clone();
            existing.is_private = task.is_private;
        }
        Ok(())
    }

    async fn set_completed(&self, id: u64) -> Result<()> {
        let mut tasks = self
            .tasks
            .write()
            .map_err(|_| anyhow!("task store lock poisoned"))?;
        if let Some(task) = tasks.get_mut(&id) {
            task.completed = true;
        }
        Ok(())
    }

    async fn delete(&self, id: u64) -> Result<bool> {
        let mut tasks = self
            .tasks
            .write()
            .map_err(|_| anyhow!("task store lock poisoned"))?;
        Ok(tasks.remove(&id).is_some())
    }
}

pub struct MemoryUserStore {
    users: RwLock<BTreeMap<u64, User>>,
    next_id: AtomicU64,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, new: NewUser) -> Result<User> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let user = User {
            id,
            name: new.name,
            email: new.email,
            password_hash: new.password_hash,
        };
        self.users
            .write()
            .map_err(|_| anyhow!("user store lock poisoned"))?
            .insert(id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self
            .users
            .read()
            .map_err(|_| anyhow!("user store lock poisoned"))?;
        Ok(users.values().find(|u| u.email == email).cloned())
    }
}

#[derive(Default)]
pub struct MemoryTokenStore {
    tokens: RwLock<HashMap<String, u64>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn insert(&self, token: &str, user_id: u64) -> Result<()> {
        self.tokens
            .write()
            .map_err(|_| anyhow!("token store lock poisoned"))?
            .insert(token.to_string(), user_id);
        Ok(())
    }

    async fn lookup(&self, token: &str) -> Result<Option<u64>> {
        let tokens = self
            .tokens
            .read()
            .map_err(|_| anyhow!("token store lock poisoned"))?;
        Ok(tokens.get(token).copied())
    }

    async fn revoke(&self, token: &str) -> Result<bool> {
        let mut tokens = self
            .tokens
            .write()
            .map_err(|_| anyhow!("token store lock poisoned"))?;
        Ok(tokens.remove(token).is_some())
    }
}

/// Asset store keeping only the set of stored keys; enough to check the
/// orphan-free invariant without touching the filesystem.
pub struct MemoryAssetStore {
    base_url: String,
    keys: RwLock<HashSet<String>>,
}

impl MemoryAssetStore {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            keys: RwLock::new(HashSet::new()),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.read().map(|k| k.contains(key)).unwrap_or(false)
    }
}

#[async_trait]
impl AssetStore for MemoryAssetStore {
    async fn store(&self, key: &str, _bytes: &[u8]) -> Result<()> {
        self.keys
            .write()
            .map_err(|_| anyhow!("asset store lock poisoned"))?
            .insert(key.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.keys
            .write()
            .map_err(|_| anyhow!("asset store lock poisoned"))?
            .remove(key);
        Ok(())
    }

    fn url(&self, key: &str) -> String {
        format!("{}/storage/{}", self.base_url, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn new_task(user_id: u64) -> NewTask {
        NewTask {
            title: "t".into(),
            description: "d".into(),
            due_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            image: None,
            is_private: false,
            user_id,
        }
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids_and_list_keeps_insertion_order() {
        let store = MemoryTaskStore::new();
        let a = store.insert(new_task(1)).await.unwrap();
        let b = store.insert(new_task(1)).await.unwrap();
        assert!(a.id < b.id);
        let ids: Vec<u64> = store.list().await.unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }

    #[tokio::test]
    async fn update_never_touches_owner_or_completed() {
        let store = MemoryTaskStore::new();
        let mut task = store.insert(new_task(1)).await.unwrap();
        store.set_completed(task.id).await.unwrap();

        task.title = "renamed".into();
        task.user_id = 99;
        task.completed = false;
        store.update(&task).await.unwrap();

        let stored = store.get(task.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "renamed");
        assert_eq!(stored.user_id, 1);
        assert!(stored.completed);
    }

    #[tokio::test]
    async fn delete_then_get_is_none() {
        let store = MemoryTaskStore::new();
        let task = store.insert(new_task(1)).await.unwrap();
        assert!(store.delete(task.id).await.unwrap());
        assert!(!store.delete(task.id).await.unwrap());
        assert!(store.get(task.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn token_lifecycle() {
        let store = MemoryTokenStore::new();
        store.insert("abc", 7).await.unwrap();
        assert_eq!(store.lookup("abc").await.unwrap(), Some(7));
        assert!(store.revoke("abc").await.unwrap());
        assert_eq!(store.lookup("abc").await.unwrap(), None);
        assert!(!store.revoke("abc").await.unwrap());
    }

    #[tokio::test]
    async fn asset_store_tracks_keys_and_renders_absolute_urls() {
        let assets = MemoryAssetStore::new("http://localhost:8080/");
        assets.store("tasks_images/x.png", b"png").await.unwrap();
        assert!(assets.contains("tasks_images/x.png"));
        assert_eq!(
            assets.url("tasks_images/x.png"),
            "http://localhost:8080/storage/tasks_images/x.png"
        );
        assets.delete("tasks_images/x.png").await.unwrap();
        assert!(!assets.contains("tasks_images/x.png"));
    }
}
