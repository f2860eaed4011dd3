use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::db::models::User;
use crate::db::repo::UserStore;
use crate::error::StoreError;

/// Default store: a map behind a single lock.
#[derive(Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn get(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(username).cloned())
    }

    async fn put(&self, user: User) -> Result<(), StoreError> {
        let key = user.store_key().to_string();
        self.users.write().await.insert(key, user);
        Ok(())
    }

    async fn delete(&self, user: &User) -> Result<(), StoreError> {
        self.users.write().await.remove(user.store_key());
        Ok(())
    }
}
