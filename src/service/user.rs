//! User resource operations on top of a [`UserStore`]

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::debug;

use crate::db::models::User;
use crate::db::repo::UserStore;
use crate::error::UserError;

pub const SESSION_LIFETIME_HOURS: i64 = 1;
pub const RATE_LIMIT: u32 = 5000;

const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Result of a login. No credentials are checked and nothing is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginSession {
    pub expires_at: DateTime<Utc>,
    pub rate_limit: u32,
}

impl LoginSession {
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            expires_at: now + Duration::hours(SESSION_LIFETIME_HOURS),
            rate_limit: RATE_LIMIT,
        }
    }

    /// `logged in user session:<expiry epoch millis>`
    pub fn token(&self) -> String {
        format!(
            "logged in user session:{}",
            self.expires_at.timestamp_millis()
        )
    }

    /// Expiry as an HTTP-date.
    pub fn expires_after(&self) -> String {
        self.expires_at.format(HTTP_DATE_FORMAT).to_string()
    }
}

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Stores `user` as given, replacing any record with the same username.
    pub async fn create_user(&self, user: User) -> Result<(), UserError> {
        debug!(username = user.store_key(), "create user");
        self.store.put(user).await?;
        Ok(())
    }

    /// Backs both the array and the list bulk routes.
    pub async fn create_users(&self, users: Vec<User>) -> Result<(), UserError> {
        debug!(count = users.len(), "create users");
        self.store.bulk_put(users).await?;
        Ok(())
    }

    pub async fn delete_user(&self, username: &str) -> Result<(), UserError> {
        debug!(username, "delete user");
        let user = self.find(username).await?;
        self.store.delete(&user).await?;
        Ok(())
    }

    pub async fn get_user_by_name(&self, username: &str) -> Result<User, UserError> {
        debug!(username, "get user");
        self.find(username).await
    }

    pub fn login_user(&self, username: &str, _password: &str) -> LoginSession {
        debug!(username, "login user");
        LoginSession::starting_at(Utc::now())
    }

    pub fn logout_user(&self) {
        debug!("logout user");
    }

    /// Upsert keyed on `username`; it overrides whatever username `user` carries.
    pub async fn update_user(&self, username: &str, mut user: User) -> Result<(), UserError> {
        user.username = Some(username.to_string());
        self.create_user(user).await
    }

    async fn find(&self, username: &str) -> Result<User, UserError> {
        self.store
            .get(username)
            .await?
            .ok_or_else(|| UserError::NotFound(username.to_string()))
    }
}
