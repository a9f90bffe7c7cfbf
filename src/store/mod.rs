//! Storage interfaces.
//!
//! The record store and the asset store are the only stateful
//! collaborators; everything above them is a stateless request handler.
//! Production wires the MySQL and filesystem implementations, the
//! integration tests wire the in-memory ones.

pub mod fs_assets;
pub mod memory;
pub mod mysql;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::task::{NewTask, Task};
use crate::models::user::{NewUser, User};

#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn insert(&self, new: NewTask) -> Result<Task>;

    async fn get(&self, id: u64) -> Result<Option<Task>>;

    /// Returns every task in insertion (id) order. Visibility filtering
    /// is the policy layer's job, not the store's.
    async fn list(&self) -> Result<Vec<Task>>;

    /// Overwrites the mutable fields of the row matching `task.id`.
    /// `user_id` and `completed` are not written here.
    async fn update(&self, task: &Task) -> Result<()>;

    async fn set_completed(&self, id: u64) -> Result<()>;

    /// Removes the row; returns false when no row matched.
    async fn delete(&self, id: u64) -> Result<bool>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, new: NewUser) -> Result<User>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
}

#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn insert(&self, token: &str, user_id: u64) -> Result<()>;

    async fn lookup(&self, token: &str) -> Result<Option<u64>>;

    /// Deletes the token; returns false when it was not present.
    async fn revoke(&self, token: &str) -> Result<bool>;
}

/// Binary asset storage: store-by-key, delete-by-key, resolve-to-URL.
#[async_trait]
pub trait AssetStore: Send + Sync {
    async fn store(&self, key: &str, bytes: &[u8]) -> Result<()>;

    async fn delete(&self, key: &str) -> Result<()>;

    /// Absolute URL for a stored key. Views never expose bare keys.
    fn url(&self, key: &str) -> String;
}
