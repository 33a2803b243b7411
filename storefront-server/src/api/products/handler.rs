//! Product API Handlers

use axum::{
    Json,
    body::Bytes,
    extract::{Multipart, Path, State},
    response::IntoResponse,
};
use http::{StatusCode, header};
use serde::Serialize;
use shared::models::{Product, ProductCreate, ProductUpdate};

use crate::api::MessageResponse;
use crate::auth::{SessionContext, assert_owner};
use crate::core::ServerState;
use crate::db::repository::product;
use crate::services::image_store;
use crate::utils::validation::{
    MAX_LABELS_LEN, MAX_NAME_LEN, parse_price, validate_optional_text, validate_price,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

const RESOURCE: &str = "product";

/// Create / update response
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub message: String,
    pub product: Product,
}

/// POST /api/products/upload - 上传商品
///
/// Multipart fields: `name`, `price`, `labels` (optional) and the `image` file.
pub async fn upload(
    State(state): State<ServerState>,
    session: SessionContext,
    mut multipart: Multipart,
) -> AppResult<Json<ProductResponse>> {
    let identity = session.require_identity()?;

    let mut name = String::new();
    let mut price_raw = String::new();
    let mut labels = String::new();
    let mut image: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::invalid_request(format!("Invalid multipart request: {e}")))?
    {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "image" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::invalid_request(format!("Multipart error: {e}")))?;
                image = Some((filename, data.to_vec()));
            }
            "name" | "price" | "labels" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::invalid_request(format!("Multipart error: {e}")))?;
                match field_name.as_str() {
                    "name" => name = text,
                    "price" => price_raw = text,
                    _ => labels = text,
                }
            }
            other => tracing::debug!(field = other, "Ignoring unknown multipart field"),
        }
    }

    validate_required_text(&name, "name", MAX_NAME_LEN)?;
    let price = parse_price(&price_raw)?;
    if labels.len() > MAX_LABELS_LEN {
        return Err(AppError::validation(format!(
            "labels is too long ({} chars, max {MAX_LABELS_LEN})",
            labels.len()
        )));
    }
    let (filename, data) = image.ok_or_else(|| AppError::new(ErrorCode::NoFileProvided))?;

    let image = image_store::store_image(&state.config.uploads_dir(), data, &filename).await?;

    let created = product::create(
        &state.pool,
        identity.user_id,
        ProductCreate {
            name,
            price,
            image,
            labels,
        },
    )
    .await?;

    tracing::info!(product_id = created.id, user_id = identity.user_id, "Product created");
    Ok(Json(ProductResponse {
        message: "Product created successfully".into(),
        product: created,
    }))
}

/// GET /api/products/mine - 我的商品
pub async fn list_mine(
    State(state): State<ServerState>,
    session: SessionContext,
) -> AppResult<Json<Vec<Product>>> {
    let identity = session.require_identity()?;
    let products = product::find_by_user(&state.pool, identity.user_id).await?;
    Ok(Json(products))
}

/// GET /api/products/:id - 商品详情 (公开)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Product>> {
    let found = find_product(&state, id).await?;
    Ok(Json(found))
}

/// PUT /api/products/:id - 更新商品
pub async fn update(
    State(state): State<ServerState>,
    session: SessionContext,
    Path(id): Path<i64>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<ProductResponse>> {
    let identity = session.require_identity()?;

    let existing = find_product(&state, id).await?;
    assert_owner(existing.user_id, identity, RESOURCE)?;

    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(price) = payload.price {
        validate_price(price)?;
    }
    validate_optional_text(&payload.labels, "labels", MAX_LABELS_LEN)?;

    let updated = product::update(&state.pool, id, payload).await?;
    Ok(Json(ProductResponse {
        message: "Product updated successfully".into(),
        product: updated,
    }))
}

/// DELETE /api/products/:id - 删除商品
///
/// Cart lines holding the product go with it; orders keep their totals.
pub async fn delete(
    State(state): State<ServerState>,
    session: SessionContext,
    Path(id): Path<i64>,
) -> AppResult<Json<MessageResponse>> {
    let identity = session.require_identity()?;

    let existing = find_product(&state, id).await?;
    assert_owner(existing.user_id, identity, RESOURCE)?;

    product::delete(&state.pool, id).await?;
    tracing::info!(product_id = id, user_id = identity.user_id, "Product deleted");
    Ok(Json(MessageResponse::new("Product deleted successfully")))
}

async fn find_product(state: &ServerState, id: i64) -> AppResult<Product> {
    product::find_by_id(&state.pool, id).await?.ok_or_else(|| {
        AppError::with_message(ErrorCode::ProductNotFound, format!("Product {id} not found"))
    })
}

/// Upload file response
pub enum ImageFile {
    Ok(Bytes),
    NotFound,
    BadRequest(&'static str),
}

impl IntoResponse for ImageFile {
    fn into_response(self) -> axum::response::Response {
        match self {
            ImageFile::Ok(content) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "image/jpeg")],
                content,
            )
                .into_response(),
            ImageFile::NotFound => (StatusCode::NOT_FOUND, "File not found").into_response(),
            ImageFile::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
        }
    }
}

/// GET /uploads/:filename - 商品图片
pub async fn serve_image(
    State(state): State<ServerState>,
    Path(filename): Path<String>,
) -> ImageFile {
    // path traversal
    if filename.is_empty()
        || filename.contains("..")
        || filename.contains('/')
        || filename.contains('\\')
    {
        return ImageFile::BadRequest("Invalid filename");
    }

    match tokio::fs::read(state.config.uploads_dir().join(&filename)).await {
        Ok(content) => ImageFile::Ok(content.into()),
        Err(e) => {
            tracing::debug!(filename = %filename, error = %e, "Image not found");
            ImageFile::NotFound
        }
    }
}
