use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::models::UserRecord;

/// Storage capability consumed by the credential service.
///
/// Email comparison is exact: no case folding, no trimming.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// All records registered under `email`, in no particular order
    async fn find(&self, email: &str) -> StoreResult<Vec<UserRecord>>;

    /// Persist a new record and assign its id.
    ///
    /// Implementations that enforce email uniqueness must fail with
    /// [`StoreError::Conflict`] atomically, without writing anything.
    async fn create(&self, email: &str, password_hash: &str) -> StoreResult<UserRecord>;
}

/// In-memory implementation of UserStore (for development/testing).
///
/// Clones share the same underlying map.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<Uuid, UserRecord>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find(&self, email: &str) -> StoreResult<Vec<UserRecord>> {
        let users = self.users.read().await;
        Ok(users.values().filter(|u| u.email == email).cloned().collect())
    }

    async fn create(&self, email: &str, password_hash: &str) -> StoreResult<UserRecord> {
        // Check and insert under one write guard so concurrent signups cannot both pass
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == email) {
            return Err(StoreError::Conflict(email.to_string()));
        }

        let user = UserRecord {
            id: Uuid::now_v7(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
        };
        users.insert(user.id, user.clone());

        tracing::info!(user_id = %user.id, "Created user");
        Ok(user)
    }
}
