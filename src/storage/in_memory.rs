//! In-memory mock stores
//!
//! Process-wide state with no durability. Each store sits behind one RwLock,
//! so an append computes its index and pushes under the same write lock.

use crate::core::model::{UploadRecord, UserProfile};
use crate::core::store::{UploadStore, UserStore};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// In-memory append-only user list
#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<Vec<UserProfile>>>,
}

impl InMemoryUserStore {
    /// Create an empty user list
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a user list that starts with `users`, ids 0..n
    pub fn seeded(users: Vec<UserProfile>) -> Self {
        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn append(&self, user: UserProfile) -> Result<usize> {
        let mut users = self
            .users
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let index = users.len();
        users.push(user);

        tracing::debug!(index, "user appended");
        Ok(index)
    }

    async fn get(&self, index: usize) -> Result<Option<UserProfile>> {
        let users = self
            .users
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(users.get(index).cloned())
    }

    async fn len(&self) -> Result<usize> {
        let users = self
            .users
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(users.len())
    }
}

/// In-memory upload metadata, one record per owner
#[derive(Clone, Default)]
pub struct InMemoryUploadStore {
    uploads: Arc<RwLock<HashMap<i64, UploadRecord>>>,
}

impl InMemoryUploadStore {
    /// Create an empty upload store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UploadStore for InMemoryUploadStore {
    async fn put(&self, owner_id: i64, record: UploadRecord) -> Result<Option<UploadRecord>> {
        let mut uploads = self
            .uploads
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let previous = uploads.insert(owner_id, record);

        tracing::debug!(owner_id, replaced = previous.is_some(), "upload metadata stored");
        Ok(previous)
    }

    async fn get(&self, owner_id: i64) -> Result<Option<UploadRecord>> {
        let uploads = self
            .uploads
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(uploads.get(&owner_id).cloned())
    }
}
