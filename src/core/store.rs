//! Store traits for the mock datastores

use crate::core::model::{UploadRecord, UserProfile};
use anyhow::Result;
use async_trait::async_trait;

/// Append-only ordered list of users
///
/// Ids are list indices: dense, increasing, never reused.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Append a user and return its index (the list length before the append)
    async fn append(&self, user: UserProfile) -> Result<usize>;

    async fn get(&self, index: usize) -> Result<Option<UserProfile>>;

    async fn len(&self) -> Result<usize>;

    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }
}

/// Upload metadata keyed by owner id; one record per owner
#[async_trait]
pub trait UploadStore: Send + Sync {
    /// Store a record, returning the one it replaced
    async fn put(&self, owner_id: i64, record: UploadRecord) -> Result<Option<UploadRecord>>;

    async fn get(&self, owner_id: i64) -> Result<Option<UploadRecord>>;
}
