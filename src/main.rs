pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod service;
pub mod telemetry;

use std::sync::Arc;
use tracing::{info, warn};

use crate::config::{AppConfig, DEFAULT_JWT_SECRET, StoreBackend};
use crate::db::memory::MemoryUserStore;
use crate::db::repo::UserStore;
use crate::db::sqlite::SqliteUserStore;
use crate::service::user::UserService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    telemetry::init_telemetry(&config.log);

    info!("Starting Petstore user service...");

    if config.auth.jwt_secret == DEFAULT_JWT_SECRET {
        warn!("auth.jwt_secret is the built-in development secret");
    }

    let store: Arc<dyn UserStore> = match config.store.backend {
        StoreBackend::Memory => Arc::new(MemoryUserStore::new()),
        StoreBackend::Sqlite => Arc::new(SqliteUserStore::connect(&config.store.url).await?),
    };
    info!(backend = ?config.store.backend, "User store ready");

    db::seed::seed(store.as_ref()).await?;

    api::server::start_server(&config, UserService::new(store)).await
}
