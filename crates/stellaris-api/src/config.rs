//! Server configuration loaded from the environment.

use stellaris_core::defaults;

/// Global request rate limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub enabled: bool,
    /// Requests allowed per period.
    pub requests: u64,
    pub period_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            requests: defaults::RATE_LIMIT_REQUESTS,
            period_secs: defaults::RATE_LIMIT_PERIOD_SECS,
        }
    }
}

/// Everything `main` needs before the first request.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Comma-separated CORS origin whitelist.
    pub allowed_origins: String,
    pub rate_limit: RateLimitConfig,
}

impl ServerConfig {
    /// Environment variables:
    ///   DATABASE_URL           - PostgreSQL URL
    ///   HOST / PORT            - listen address (default 0.0.0.0:3000)
    ///   ALLOWED_ORIGINS        - CORS whitelist (default http://localhost:3000)
    ///   RATE_LIMIT_ENABLED     - "true"/"1" (default true)
    ///   RATE_LIMIT_REQUESTS    - requests per period (default 100)
    ///   RATE_LIMIT_PERIOD_SECS - period in seconds (default 60)
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| defaults::DATABASE_URL.to_string()),
            host: std::env::var("HOST").unwrap_or_else(|_| defaults::HOST.to_string()),
            port: env_parse("PORT", defaults::PORT),
            allowed_origins: std::env::var("ALLOWED_ORIGINS").unwrap_or_default(),
            rate_limit: RateLimitConfig {
                enabled: std::env::var("RATE_LIMIT_ENABLED")
                    .map(|v| v == "true" || v == "1")
                    .unwrap_or(true),
                requests: env_parse("RATE_LIMIT_REQUESTS", defaults::RATE_LIMIT_REQUESTS),
                period_secs: env_parse("RATE_LIMIT_PERIOD_SECS", defaults::RATE_LIMIT_PERIOD_SECS),
            },
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
