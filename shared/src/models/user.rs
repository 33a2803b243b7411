//! User Model

use serde::{Deserialize, Serialize};

/// User account row
///
/// Secrets never leave the server: the password hash and the stored chat API
/// key are skipped on serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(skip_serializing)]
    pub openai_key: Option<String>,
    /// Name of the user's HTML page shown as landing page
    pub main_menu_page: Option<String>,
    pub created_at: i64,
}

/// Public projection of a user (listings)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub created_at: i64,
}

/// Register / login payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}
