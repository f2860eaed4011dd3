use async_trait::async_trait;

use crate::db::models::User;
use crate::error::StoreError;

/// Keyed collection of users. The key is always the record's own username.
///
/// Individual calls are atomic; nothing spans calls, so concurrent writers to
/// the same username race and the last one wins.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Insert or overwrite. No merge with a previous record.
    async fn put(&self, user: User) -> Result<(), StoreError>;

    async fn delete(&self, user: &User) -> Result<(), StoreError>;

    /// Applies `put` in sequence order. Stops at the first failure and does
    /// not undo what was already written.
    async fn bulk_put(&self, users: Vec<User>) -> Result<(), StoreError> {
        for user in users {
            self.put(user).await?;
        }
        Ok(())
    }
}
