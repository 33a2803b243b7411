//! Data models
//!
//! Shared between the server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY); timestamps are Unix millis.

pub mod cart;
pub mod dining_table;
pub mod html_page;
pub mod order;
pub mod product;
pub mod user;

// Re-exports
pub use cart::*;
pub use dining_table::*;
pub use html_page::*;
pub use order::*;
pub use product::*;
pub use user::*;
