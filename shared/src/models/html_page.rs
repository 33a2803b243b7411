//! HTML Page Model

use serde::{Deserialize, Serialize};

/// Stored HTML page; `name` is unique per owner
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct HtmlPage {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub content: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Page listing entry (content omitted)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct HtmlPageSummary {
    pub id: i64,
    pub name: String,
    pub created_at: i64,
    pub updated_at: i64,
}
