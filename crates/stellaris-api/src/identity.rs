//! Request-scoped user identity.
//!
//! The session layer in front of the API authenticates the user and
//! forwards the identity in two headers. Handlers receive it as a
//! [`CurrentUser`] extractor and pass the [`UserContext`] into the core
//! explicitly.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use stellaris_core::UserContext;

use crate::ApiError;

/// Header carrying the authenticated user's UUID.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Header carrying the authenticated user's display name.
///
/// The value is read as raw UTF-8 bytes, so names outside visible ASCII
/// (`Zoë`, `Алькор`) pass through unchanged. Values that are not valid
/// UTF-8 are rejected.
pub const USER_NAME_HEADER: &str = "x-user-name";

/// Extractor that requires a forwarded identity.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserContext);

#[axum::async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| std::str::from_utf8(v.as_bytes()).ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        let user_id = header(USER_ID_HEADER)
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))?;
        let user_id = Uuid::parse_str(user_id)
            .map_err(|_| ApiError::Unauthorized(format!("Invalid {} header", USER_ID_HEADER)))?;
        let display_name = header(USER_NAME_HEADER)
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))?;

        Ok(CurrentUser(UserContext::new(user_id, display_name)))
    }
}
