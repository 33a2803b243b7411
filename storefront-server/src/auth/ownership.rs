//! Ownership checks
//!
//! One rule for every owned entity (product, HTML page): only the user
//! recorded on the row may read its detail or change it.

use crate::auth::Identity;
use crate::security_log;
use crate::utils::{AppError, AppResult};

/// Fail with `PermissionDenied` unless `identity` owns the entity
pub fn assert_owner(owner_id: i64, identity: &Identity, resource: &str) -> AppResult<()> {
    if owner_id == identity.user_id {
        return Ok(());
    }
    security_log!(
        "WARN",
        "ownership_denied",
        resource = resource,
        owner_id = owner_id,
        user_id = identity.user_id
    );
    Err(AppError::permission_denied(format!(
        "You do not have permission to modify this {resource}"
    )))
}
