//! Global request rate limiting.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use governor::{Quota, RateLimiter};

use stellaris_core::{Error, Result};

use crate::config::RateLimitConfig;
use crate::AppState;

pub type GlobalRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// Build the limiter described by `config`, or `None` when disabled.
///
/// Allows a burst of `requests` and replenishes evenly across the period.
pub fn build_rate_limiter(config: &RateLimitConfig) -> Result<Option<Arc<GlobalRateLimiter>>> {
    if !config.enabled {
        return Ok(None);
    }

    let requests = u32::try_from(config.requests)
        .ok()
        .and_then(NonZeroU32::new)
        .ok_or_else(|| Error::Config("RATE_LIMIT_REQUESTS must be between 1 and 2^32-1".into()))?;
    if config.period_secs == 0 {
        return Err(Error::Config("RATE_LIMIT_PERIOD_SECS must be non-zero".into()));
    }
    let replenish = Duration::from_secs(config.period_secs) / requests.get();
    let quota = Quota::with_period(replenish)
        .ok_or_else(|| {
            Error::Config(format!(
                "RATE_LIMIT_PERIOD_SECS={} is too short for RATE_LIMIT_REQUESTS={}",
                config.period_secs, config.requests
            ))
        })?
        .allow_burst(requests);

    Ok(Some(Arc::new(RateLimiter::direct(quota))))
}

pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: axum::extract::Request,
    next: axum::middleware::Next,
) -> std::result::Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    if let Some(limiter) = &state.rate_limiter {
        if limiter.check().is_err() {
            tracing::warn!("Rate limit exceeded");
            return Err((
                StatusCode::TOO_MANY_REQUESTS,
                Json(serde_json::json!({
                    "error": "rate_limit_exceeded",
                    "error_description": "Too many requests. Please wait before retrying."
                })),
            ));
        }
    }
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_builds_nothing() {
        let config = RateLimitConfig {
            enabled: false,
            ..Default::default()
        };
        assert!(build_rate_limiter(&config).unwrap().is_none());
    }

    #[test]
    fn test_burst_is_enforced() {
        let config = RateLimitConfig {
            enabled: true,
            requests: 2,
            period_secs: 3600,
        };
        let limiter = build_rate_limiter(&config).unwrap().unwrap();
        assert!(limiter.check().is_ok());
        assert!(limiter.check().is_ok());
        assert!(limiter.check().is_err());
    }

    #[test]
    fn test_zero_values_are_config_errors() {
        let zero_requests = RateLimitConfig {
            enabled: true,
            requests: 0,
            period_secs: 60,
        };
        assert!(matches!(
            build_rate_limiter(&zero_requests),
            Err(Error::Config(_))
        ));

        let zero_period = RateLimitConfig {
            enabled: true,
            requests: 10,
            period_secs: 0,
        };
        assert!(matches!(
            build_rate_limiter(&zero_period),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_period_too_short_for_request_count() {
        let config = RateLimitConfig {
            enabled: true,
            requests: u64::from(u32::MAX),
            period_secs: 1,
        };
        match build_rate_limiter(&config) {
            Err(Error::Config(msg)) => {
                assert!(msg.contains("too short"), "unexpected message: {}", msg);
                assert!(!msg.contains("non-zero"));
            }
            other => panic!("Expected Config error, got {:?}", other.map(|l| l.is_some())),
        }
    }
}
