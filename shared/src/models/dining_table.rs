//! Dining Table Model

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default seats for a new table
pub const DEFAULT_TABLE_CAPACITY: i64 = 4;

/// Table status; deleting a table only flips it to `Inactive`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum TableStatus {
    #[default]
    Active,
    Inactive,
}

impl TableStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableStatus::Active => "active",
            TableStatus::Inactive => "inactive",
        }
    }
}

impl FromStr for TableStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(TableStatus::Active),
            "inactive" => Ok(TableStatus::Inactive),
            other => Err(format!("invalid table status: {other}")),
        }
    }
}

/// Dining table entity (桌台)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DiningTable {
    pub id: i64,
    pub table_number: i64,
    pub capacity: i64,
    pub status: TableStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create dining table payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiningTableCreate {
    pub table_number: Option<i64>,
    pub capacity: Option<i64>,
    pub status: Option<String>,
}

/// Update dining table payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiningTableUpdate {
    pub table_number: Option<i64>,
    pub capacity: Option<i64>,
    pub status: Option<String>,
}
