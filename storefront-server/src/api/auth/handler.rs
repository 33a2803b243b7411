//! Authentication Handlers
//!
//! Registration, login and logout against the credential store.

use axum::{Json, extract::State};
use serde::Serialize;
use shared::models::{Credentials, UserSummary};

use crate::api::MessageResponse;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::{Identity, SessionContext, SetSessionCookie};
use crate::core::ServerState;
use crate::db::repository::{RepoError, user};
use crate::security_log;
use crate::utils::validation::{MAX_PASSWORD_LEN, MAX_USERNAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Dashboard response
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub username: String,
}

/// POST /api/register - 注册新用户
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<Credentials>,
) -> AppResult<Json<MessageResponse>> {
    validate_required_text(&req.username, "username", MAX_USERNAME_LEN)?;
    validate_required_text(&req.password, "password", MAX_PASSWORD_LEN)?;

    if user::find_by_username(&state.pool, &req.username)
        .await?
        .is_some()
    {
        return Err(AppError::new(ErrorCode::UsernameExists));
    }

    let hash = hash_password(&req.password)?;
    let created = user::create(&state.pool, &req.username, &hash)
        .await
        .map_err(|e| match e {
            // lost a race against a concurrent registration
            RepoError::Duplicate(_) => AppError::new(ErrorCode::UsernameExists),
            other => other.into(),
        })?;

    tracing::info!(user_id = created.id, username = %created.username, "User registered");
    Ok(Json(MessageResponse::new("User registered successfully")))
}

/// POST /api/login - 登录
///
/// Unknown usernames and wrong passwords get the same response.
pub async fn login(
    State(state): State<ServerState>,
    mut session: SessionContext,
    Json(req): Json<Credentials>,
) -> AppResult<(SetSessionCookie, Json<MessageResponse>)> {
    validate_required_text(&req.username, "username", MAX_USERNAME_LEN)?;
    validate_required_text(&req.password, "password", MAX_PASSWORD_LEN)?;

    let Some(found) = user::find_by_username(&state.pool, &req.username).await? else {
        security_log!("WARN", "login_failed", username = req.username.as_str(), reason = "user_not_found");
        return Err(AppError::invalid_credentials());
    };

    if !verify_password(&req.password, &found.password_hash) {
        security_log!("WARN", "login_failed", username = req.username.as_str(), reason = "invalid_credentials");
        return Err(AppError::invalid_credentials());
    }

    session
        .login(
            &state,
            Identity {
                user_id: found.id,
                username: found.username.clone(),
            },
        )
        .await?;

    security_log!("INFO", "login_success", user_id = found.id, username = found.username.as_str());
    Ok((
        session.set_cookie(),
        Json(MessageResponse::new("Login successful")),
    ))
}

/// GET /api/logout - 登出
pub async fn logout(
    State(state): State<ServerState>,
    mut session: SessionContext,
) -> AppResult<(SetSessionCookie, Json<MessageResponse>)> {
    if let Some(identity) = &session.identity {
        tracing::info!(user_id = identity.user_id, "User logged out");
    }
    session.logout(&state).await?;
    Ok((
        session.set_cookie(),
        Json(MessageResponse::new("Logged out successfully")),
    ))
}

/// GET /api/dashboard - 当前登录用户
pub async fn dashboard(session: SessionContext) -> AppResult<Json<DashboardResponse>> {
    let identity = session.require_identity()?;
    Ok(Json(DashboardResponse {
        username: identity.username.clone(),
    }))
}

/// GET /api/users - 用户列表 (不含密钥)
pub async fn list_users(
    State(state): State<ServerState>,
    session: SessionContext,
) -> AppResult<Json<Vec<UserSummary>>> {
    session.require_identity()?;
    let users = user::find_all(&state.pool).await?;
    Ok(Json(users))
}
