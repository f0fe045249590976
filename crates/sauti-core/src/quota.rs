//! Per-user upload quota guard.
//!
//! A pure comparison with no side effects: denial means the pipeline never
//! starts and the upload count is not incremented. The repository's guarded
//! insert re-checks the ceiling atomically, so two concurrent requests at
//! exactly the limit cannot both pass.

use crate::error::AppError;

/// Default ceiling on total audio uploads ever accepted per user.
pub const DEFAULT_UPLOAD_LIMIT: i64 = 100;

/// Deny when the user's existing upload count has reached the ceiling.
pub fn check_quota(current_upload_count: i64, limit: i64) -> Result<(), AppError> {
    if current_upload_count >= limit {
        return Err(AppError::QuotaExceeded {
            used: current_upload_count,
            limit,
        });
    }
    Ok(())
}
