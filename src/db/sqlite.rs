use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqlitePoolOptions, SqliteRow};
use sqlx::{ConnectOptions, Row, SqlitePool};
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::db::models::User;
use crate::db::repo::UserStore;
use crate::error::StoreError;

/// Store backed by SQLite through sqlx.
#[derive(Clone)]
pub struct SqliteUserStore {
    pool: SqlitePool,
    // Keeps an in-memory database alive while pool connections come and go.
    _anchor: Option<Arc<Mutex<SqliteConnection>>>,
}

impl SqliteUserStore {
    /// Connects and creates the `users` table.
    ///
    /// An in-memory database exists only while some connection to it is
    /// open, so for `:memory:` / `mode=memory` URLs a connection is held
    /// outside the pool for the lifetime of the store.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?;

        let anchor = if is_in_memory(url) {
            Some(Arc::new(Mutex::new(options.connect().await?)))
        } else {
            None
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        create_user_table(&pool).await?;

        Ok(Self {
            pool,
            _anchor: anchor,
        })
    }
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

async fn create_user_table(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            user_key TEXT PRIMARY KEY NOT NULL,
            id INTEGER,
            username TEXT,
            first_name TEXT,
            last_name TEXT,
            email TEXT,
            password TEXT,
            phone TEXT,
            user_status INTEGER
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

fn user_from_row(row: &SqliteRow) -> Result<User, sqlx::Error> {
    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
        password: row.try_get("password")?,
        phone: row.try_get("phone")?,
        user_status: row.try_get("user_status")?,
    })
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn get(&self, username: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query("SELECT * FROM users WHERE user_key = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(user_from_row).transpose()?)
    }

    async fn put(&self, user: User) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO users
                (user_key, id, username, first_name, last_name, email, password, phone, user_status)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.store_key())
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(&user.phone)
        .bind(user.user_status)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, user: &User) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM users WHERE user_key = ?")
            .bind(user.store_key())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
