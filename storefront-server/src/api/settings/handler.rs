//! User Settings Handlers
//!
//! Per-user chat API key, the chat-completion passthrough, and the
//! main-menu page preference.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use shared::models::User;

use crate::api::MessageResponse;
use crate::auth::{Identity, SessionContext};
use crate::core::ServerState;
use crate::db::repository::{html_page, user};
use crate::services::chat::{self, ChatMessage, ReplyMessage, mask_api_key};
use crate::utils::validation::{MAX_API_KEY_LEN, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Debug, Deserialize)]
pub struct SetKeyRequest {
    #[serde(default)]
    pub api_key: String,
}

#[derive(Debug, Serialize)]
pub struct KeyStatusResponse {
    pub has_key: bool,
    pub masked_key: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub message: ReplyMessage,
}

#[derive(Debug, Serialize)]
pub struct MainMenuResponse {
    pub main_menu_page: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MainMenuRequest {
    #[serde(default)]
    pub page_name: String,
}

/// POST /api/openai/set-key - 保存 API Key
pub async fn set_key(
    State(state): State<ServerState>,
    session: SessionContext,
    Json(req): Json<SetKeyRequest>,
) -> AppResult<Json<MessageResponse>> {
    let identity = session.require_identity()?;
    let key = req.api_key.trim();
    validate_required_text(key, "api_key", MAX_API_KEY_LEN)?;

    user::set_openai_key(&state.pool, identity.user_id, key).await?;
    tracing::info!(user_id = identity.user_id, "Chat API key updated");
    Ok(Json(MessageResponse::new("API key saved successfully")))
}

/// GET /api/openai/get-key - 查询 API Key (脱敏)
pub async fn get_key(
    State(state): State<ServerState>,
    session: SessionContext,
) -> AppResult<Json<KeyStatusResponse>> {
    let identity = session.require_identity()?;
    let current = load_user(&state, identity).await?;

    let response = match current.openai_key.as_deref().filter(|k| !k.is_empty()) {
        Some(key) => KeyStatusResponse {
            has_key: true,
            masked_key: mask_api_key(key),
        },
        None => KeyStatusResponse {
            has_key: false,
            masked_key: String::new(),
        },
    };
    Ok(Json(response))
}

/// POST /api/openai/chat - 对话补全代理
pub async fn chat(
    State(state): State<ServerState>,
    session: SessionContext,
    Json(req): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    let identity = session.require_identity()?;
    if req.messages.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            "messages must not be empty",
        ));
    }

    let current = load_user(&state, identity).await?;
    let api_key = current
        .openai_key
        .filter(|k| !k.is_empty())
        .ok_or_else(|| AppError::new(ErrorCode::ChatApiKeyMissing))?;

    let message = chat::complete(&state.http, &state.config, &api_key, &req.messages).await?;
    Ok(Json(ChatResponse { message }))
}

/// GET /api/user/main-menu - 查询主菜单页面
pub async fn get_main_menu(
    State(state): State<ServerState>,
    session: SessionContext,
) -> AppResult<Json<MainMenuResponse>> {
    let identity = session.require_identity()?;
    let current = load_user(&state, identity).await?;
    Ok(Json(MainMenuResponse {
        main_menu_page: current.main_menu_page,
    }))
}

/// PUT /api/user/main-menu - 设置主菜单页面
///
/// An empty `page_name` clears the setting.
pub async fn set_main_menu(
    State(state): State<ServerState>,
    session: SessionContext,
    Json(req): Json<MainMenuRequest>,
) -> AppResult<Json<MainMenuResponse>> {
    let identity = session.require_identity()?;
    let page_name = req.page_name.trim();

    let page = if page_name.is_empty() {
        None
    } else {
        html_page::find(&state.pool, identity.user_id, page_name)
            .await?
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::PageNotFound,
                    format!("Page '{page_name}' not found"),
                )
            })?;
        Some(page_name)
    };

    user::set_main_menu_page(&state.pool, identity.user_id, page).await?;
    Ok(Json(MainMenuResponse {
        main_menu_page: page.map(str::to_string),
    }))
}

async fn load_user(state: &ServerState, identity: &Identity) -> AppResult<User> {
    user::find_by_id(&state.pool, identity.user_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))
}
