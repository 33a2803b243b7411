//! Shared types for the storefront
//!
//! Error codes, API error bodies and domain models used by the server and
//! by API clients.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
