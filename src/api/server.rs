use axum::{
    Router,
    http::StatusCode,
    middleware,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::scope::{ScopeGate, scope_gate};
use crate::api::user;
use crate::config::AppConfig;
use crate::service::user::UserService;

#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
}

pub fn build_router(state: Arc<AppState>, config: &AppConfig) -> Router {
    let gate = Arc::new(ScopeGate::new(&config.api, &config.auth));

    let api = Router::new()
        .route("/user", post(user::create_user))
        .route("/user/createWithArray", post(user::create_users))
        .route("/user/createWithList", post(user::create_users))
        .route("/user/login", get(user::login_user))
        .route("/user/logout", get(user::logout_user))
        .route(
            "/user/{username}",
            get(user::get_user_by_name)
                .put(user::update_user)
                .delete(user::delete_user),
        );

    let prefix = config.api.prefix();
    let app = if prefix.is_empty() {
        Router::new().merge(api)
    } else {
        Router::new().nest(&prefix, api)
    };

    app.route("/health", get(|| async { "OK" }))
        .fallback(|| async { StatusCode::NOT_FOUND })
        .layer(middleware::from_fn_with_state(gate, scope_gate))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(config: &AppConfig, users: UserService) -> anyhow::Result<()> {
    let state = Arc::new(AppState { users });
    let app = build_router(state, config);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;

    info!(
        "Server running on http://{} (base path {:?})",
        addr, config.api.base_path
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
