//! HTTP middleware for stellaris-api.

pub mod rate_limit;
pub mod request_id;

pub use rate_limit::{build_rate_limiter, rate_limit_middleware, GlobalRateLimiter};
pub use request_id::MakeRequestUuidV7;
