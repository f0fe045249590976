//! Caller identity extraction.
//!
//! Authentication lives upstream (gateway/session service); by the time a
//! request reaches this core, its identity has been verified and is carried
//! in the `x-user-id` header. The core only needs the stable user id.

use crate::error::HttpAppError;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use sauti_core::AppError;
use uuid::Uuid;

pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated caller for one request.
#[derive(Debug, Clone, Copy)]
pub struct UserContext {
    pub user_id: Uuid,
}

// FromRequestParts (not Extension) so the extractor composes with Multipart.
impl<S> FromRequestParts<S> for UserContext
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|raw| raw.parse::<Uuid>().ok())
            .map(|user_id| UserContext { user_id })
            .ok_or_else(|| {
                HttpAppError(AppError::Unauthorized(
                    "Missing or invalid user identity".to_string(),
                ))
            })
    }
}
