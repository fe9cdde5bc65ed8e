//! Acting user extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use mediadesk_core::error::AppError;
use mediadesk_core::types::UserId;
use mediadesk_entity::USER_ID_HEADER;

use crate::error::ApiError;

/// The user named by the `x-user-id` header, if any.
///
/// Identity is not verified here; it is only recorded as creator or
/// uploader.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActingUser(pub Option<UserId>);

impl<S: Send + Sync> FromRequestParts<S> for ActingUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(USER_ID_HEADER) else {
            return Ok(Self(None));
        };

        let user_id = value
            .to_str()
            .ok()
            .and_then(|raw| raw.trim().parse::<UserId>().ok())
            .ok_or_else(|| AppError::validation(format!("Invalid {USER_ID_HEADER} header")))?;

        Ok(Self(Some(user_id)))
    }
}
