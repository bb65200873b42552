//! Mapping of core errors onto HTTP responses.

use axum::{http::StatusCode, response::IntoResponse, Json};

/// Error code clients match on when a query resolves to nothing.
pub const TARGET_NOT_FOUND: &str = "TARGET_NOT_FOUND";

#[derive(Debug)]
pub enum ApiError {
    Internal(stellaris_core::Error),
    Unauthorized(String),
    NotFound { query: String },
    BadRequest(String),
    Conflict(String),
    Unavailable(String),
}

impl From<stellaris_core::Error> for ApiError {
    fn from(err: stellaris_core::Error) -> Self {
        use stellaris_core::Error;

        if err.is_unique_violation() {
            return ApiError::Conflict(err.to_string());
        }
        match err {
            Error::StarNotFound { query } => ApiError::NotFound { query },
            Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            Error::Unauthorized(msg) => ApiError::Unauthorized(msg),
            Error::LookupUnavailable(msg) => ApiError::Unavailable(msg),
            other => ApiError::Internal(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::NotFound { query } => {
                let body = Json(serde_json::json!({
                    "error": TARGET_NOT_FOUND,
                    "query": query,
                }));
                return (StatusCode::NOT_FOUND, body).into_response();
            }
            ApiError::Internal(err) => {
                tracing::error!(error = %err, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unavailable(msg) => {
                tracing::warn!(error = %msg, "Star catalog unavailable");
                (StatusCode::SERVICE_UNAVAILABLE, msg)
            }
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stellaris_core::Error;
    use uuid::Uuid;

    fn status_of(err: Error) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_of(Error::star_not_found("Xyzzy")), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(Error::InvalidInput("star_name is required".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(Error::Unauthorized("no user".into())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(Error::LookupUnavailable("timeout".into())),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(Error::ConflictRetried {
                user_id: Uuid::nil(),
                name: "Vega".into()
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(Error::Internal("boom".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
