//! # stellaris-api
//!
//! HTTP JSON API for the stellaris star browser.
//!
//! The router is built from an [`AppState`] holding trait objects, so the
//! binary wires in PostgreSQL and the HTTP star catalog while tests wire in
//! the in-memory fakes from `stellaris_core::mock`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod middleware;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use stellaris_core::{
    AnnotationService, ConstellationCharter, DiscoveredStarRepository, DiscoveryReconciler,
    StarCatalog, StarNoteRepository,
};

pub use config::{RateLimitConfig, ServerConfig};
pub use error::ApiError;
pub use identity::{CurrentUser, USER_ID_HEADER, USER_NAME_HEADER};
pub use middleware::{build_rate_limiter, GlobalRateLimiter, MakeRequestUuidV7};

use handlers::{constellations, notes, stars, system};

/// Default CORS origin when `ALLOWED_ORIGINS` is unset or empty.
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Request bodies are small JSON documents.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub stars: Arc<dyn DiscoveredStarRepository>,
    pub notes: Arc<dyn StarNoteRepository>,
    pub reconciler: DiscoveryReconciler,
    pub annotations: AnnotationService,
    pub charter: ConstellationCharter,
    /// Global rate limiter (None if rate limiting is disabled).
    pub rate_limiter: Option<Arc<GlobalRateLimiter>>,
}

impl AppState {
    pub fn new(
        stars: Arc<dyn DiscoveredStarRepository>,
        notes: Arc<dyn StarNoteRepository>,
        catalog: Arc<dyn StarCatalog>,
    ) -> Self {
        Self {
            reconciler: DiscoveryReconciler::new(stars.clone(), catalog.clone()),
            annotations: AnnotationService::new(notes.clone()),
            charter: ConstellationCharter::new(stars.clone(), catalog),
            stars,
            notes,
            rate_limiter: None,
        }
    }

    pub fn with_rate_limiter(mut self, rate_limiter: Option<Arc<GlobalRateLimiter>>) -> Self {
        self.rate_limiter = rate_limiter;
        self
    }
}

/// Parse a comma-separated CORS origin whitelist.
///
/// Invalid entries are skipped with a warning; an empty list falls back to
/// [`DEFAULT_ALLOWED_ORIGIN`].
pub fn parse_allowed_origins(origins: &str) -> Vec<HeaderValue> {
    let parsed: Vec<HeaderValue> = origins
        .split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect();

    if parsed.is_empty() {
        return vec![HeaderValue::from_static(DEFAULT_ALLOWED_ORIGIN)];
    }
    parsed
}

/// Build the full application router with middleware.
pub fn router(state: AppState, allowed_origins: Vec<HeaderValue>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(system::health_check))
        // Stars
        .route("/api/v1/stars", get(stars::get_dashboard))
        .route("/api/v1/stars/search", get(stars::search_star))
        .route("/api/v1/stars/favorite", post(stars::toggle_favorite))
        // Notes
        .route("/api/v1/notes", get(notes::list_notes).post(notes::save_note))
        .route("/api/v1/notes/:star_name", delete(notes::delete_note))
        .route("/api/v1/observatory", get(notes::observatory))
        // Constellations
        .route(
            "/api/v1/constellations/search",
            get(constellations::search_constellation),
        )
        .route(
            "/api/v1/constellations/discover",
            post(constellations::discover),
        )
        // Rate limiting status endpoint
        .route("/api/v1/rate-limit/status", get(system::rate_limit_status))
        // Middleware
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(allowed_origins))
                .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
                .allow_headers([
                    header::CONTENT_TYPE,
                    header::ACCEPT,
                    HeaderName::from_static(USER_ID_HEADER),
                    HeaderName::from_static(USER_NAME_HEADER),
                ])
                .allow_credentials(true)
                .max_age(std::time::Duration::from_secs(3600)),
        )
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}
