//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity, owned by the user who uploaded it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    /// Price in the smallest currency unit
    pub price: i64,
    /// Image reference (`/uploads/<file>`)
    pub image: String,
    /// Free-text label tag
    pub labels: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create product payload (assembled from the multipart upload form)
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub name: String,
    pub price: i64,
    pub image: String,
    pub labels: String,
}

/// Update product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<i64>,
    pub labels: Option<String>,
}
