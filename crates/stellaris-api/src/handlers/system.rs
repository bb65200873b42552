use axum::{extract::State, response::IntoResponse, Json};

use crate::AppState;

pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Get rate limiting status.
pub async fn rate_limit_status(State(state): State<AppState>) -> impl IntoResponse {
    if state.rate_limiter.is_some() {
        Json(serde_json::json!({
            "enabled": true,
            "message": "Rate limiting is active"
        }))
    } else {
        Json(serde_json::json!({
            "enabled": false,
            "message": "Rate limiting is disabled"
        }))
    }
}
