use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::api::server::AppState;
use crate::db::models::User;
use crate::error::ApiError;

pub const X_EXPIRES_AFTER: &str = "x-expires-after";
pub const X_RATE_LIMIT: &str = "x-rate-limit";

#[derive(Debug, Deserialize)]
pub struct LoginParams {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// POST /user
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(user): Json<User>,
) -> Result<StatusCode, ApiError> {
    state.users.create_user(user).await?;
    Ok(StatusCode::OK)
}

/// POST /user/createWithArray and POST /user/createWithList
pub async fn create_users(
    State(state): State<Arc<AppState>>,
    Json(users): Json<Vec<User>>,
) -> Result<StatusCode, ApiError> {
    state.users.create_users(users).await?;
    Ok(StatusCode::OK)
}

/// GET /user/{username}
pub async fn get_user_by_name(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.users.get_user_by_name(&username).await?))
}

/// PUT /user/{username}
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
    Json(user): Json<User>,
) -> Result<StatusCode, ApiError> {
    state.users.update_user(&username, user).await?;
    Ok(StatusCode::OK)
}

/// DELETE /user/{username}
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.users.delete_user(&username).await?;
    Ok(StatusCode::OK)
}

/// GET /user/login
pub async fn login_user(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LoginParams>,
) -> impl IntoResponse {
    let session = state.users.login_user(
        params.username.as_deref().unwrap_or_default(),
        params.password.as_deref().unwrap_or_default(),
    );

    (
        StatusCode::OK,
        [
            (X_EXPIRES_AFTER, session.expires_after()),
            (X_RATE_LIMIT, session.rate_limit.to_string()),
        ],
        session.token(),
    )
}

/// GET /user/logout
pub async fn logout_user(State(state): State<Arc<AppState>>) -> StatusCode {
    state.users.logout_user();
    StatusCode::OK
}
