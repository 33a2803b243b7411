//! HTML Page API Handlers

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use http::header;
use serde::Serialize;
use shared::models::{HtmlPage, HtmlPageSummary, User};

use crate::api::MessageResponse;
use crate::auth::{Identity, SessionContext, assert_owner};
use crate::core::ServerState;
use crate::db::repository::{html_page, user};
use crate::utils::validation::{MAX_NAME_LEN, MAX_PAGE_CONTENT_LEN, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode};

const RESOURCE: &str = "page";

/// Content-Security-Policy for rendered pages
const RENDER_CSP: &str = "default-src * 'unsafe-inline' 'unsafe-eval'; connect-src *; img-src * data: blob:; style-src * 'unsafe-inline';";

/// Save response
#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub message: String,
    pub id: i64,
}

/// List response
#[derive(Debug, Serialize)]
pub struct PageListResponse {
    pub pages: Vec<HtmlPageSummary>,
}

/// PUT /api/html/save/:username/:page - 保存页面
///
/// The raw request body is the page content; saving twice overwrites.
pub async fn save(
    State(state): State<ServerState>,
    session: SessionContext,
    Path((username, page)): Path<(String, String)>,
    body: String,
) -> AppResult<Json<SaveResponse>> {
    let identity = session.require_identity()?;
    let owner = resolve_owner(&state, &username, identity).await?;
    validate_required_text(&page, "page", MAX_NAME_LEN)?;
    if body.len() > MAX_PAGE_CONTENT_LEN {
        return Err(AppError::validation(format!(
            "Page content is too large ({} bytes, max {MAX_PAGE_CONTENT_LEN})",
            body.len()
        )));
    }

    let id = html_page::upsert(&state.pool, owner.id, &page, &body).await?;
    tracing::info!(page_id = id, user_id = owner.id, page = %page, "Page saved");
    Ok(Json(SaveResponse {
        message: "Page saved successfully".into(),
        id,
    }))
}

/// GET /api/html/get/:username/:page - 获取页面
pub async fn get_page(
    State(state): State<ServerState>,
    session: SessionContext,
    Path((username, page)): Path<(String, String)>,
) -> AppResult<Json<HtmlPage>> {
    let identity = session.require_identity()?;
    let owner = resolve_owner(&state, &username, identity).await?;
    let found = find_page(&state, owner.id, &page).await?;
    Ok(Json(found))
}

/// GET /api/html/list - 我的页面列表
pub async fn list(
    State(state): State<ServerState>,
    session: SessionContext,
) -> AppResult<Json<PageListResponse>> {
    let identity = session.require_identity()?;
    let pages = html_page::find_by_user(&state.pool, identity.user_id).await?;
    Ok(Json(PageListResponse { pages }))
}

/// DELETE /api/html/delete/:username/:page - 删除页面
pub async fn delete(
    State(state): State<ServerState>,
    session: SessionContext,
    Path((username, page)): Path<(String, String)>,
) -> AppResult<Json<MessageResponse>> {
    let identity = session.require_identity()?;
    let owner = resolve_owner(&state, &username, identity).await?;
    if !html_page::delete(&state.pool, owner.id, &page).await? {
        return Err(page_not_found(&page));
    }
    tracing::info!(user_id = owner.id, page = %page, "Page deleted");
    Ok(Json(MessageResponse::new("Page deleted successfully")))
}

/// GET /api/html/render/:username/:page - 渲染页面 (公开)
pub async fn render(
    State(state): State<ServerState>,
    Path((username, page)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let owner = find_user(&state, &username).await?;
    let found = find_page(&state, owner.id, &page).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8"),
            (header::CONTENT_SECURITY_POLICY, RENDER_CSP),
            (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
        ],
        found.content,
    ))
}

/// Resolve the path username and require the caller to be that user
async fn resolve_owner(state: &ServerState, username: &str, identity: &Identity) -> AppResult<User> {
    let owner = find_user(state, username).await?;
    assert_owner(owner.id, identity, RESOURCE)?;
    Ok(owner)
}

async fn find_user(state: &ServerState, username: &str) -> AppResult<User> {
    user::find_by_username(&state.pool, username)
        .await?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::UserNotFound, format!("User '{username}' not found"))
        })
}

async fn find_page(state: &ServerState, user_id: i64, page: &str) -> AppResult<HtmlPage> {
    html_page::find(&state.pool, user_id, page)
        .await?
        .ok_or_else(|| page_not_found(page))
}

fn page_not_found(page: &str) -> AppError {
    AppError::with_message(ErrorCode::PageNotFound, format!("Page '{page}' not found"))
}
