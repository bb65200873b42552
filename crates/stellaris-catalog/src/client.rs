//! HTTP star catalog backend.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, instrument, warn};

use stellaris_core::{defaults, Error, Result, StarCandidate, StarCatalog};

use crate::types::CatalogStar;

/// Header carrying the catalog API key.
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// Configuration for the HTTP star catalog.
#[derive(Debug, Clone)]
pub struct StarCatalogConfig {
    /// Base URL, without the trailing `/stars`.
    pub base_url: String,
    /// API key sent as [`API_KEY_HEADER`] (optional for local mirrors).
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for StarCatalogConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::STAR_CATALOG_URL.to_string(),
            api_key: None,
            timeout_seconds: defaults::STAR_CATALOG_TIMEOUT_SECS,
        }
    }
}

impl StarCatalogConfig {
    /// Load from `STAR_CATALOG_URL`, `STAR_CATALOG_API_KEY` and
    /// `STAR_CATALOG_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("STAR_CATALOG_URL")
                .unwrap_or_else(|_| defaults::STAR_CATALOG_URL.to_string()),
            api_key: std::env::var("STAR_CATALOG_API_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
            timeout_seconds: std::env::var("STAR_CATALOG_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults::STAR_CATALOG_TIMEOUT_SECS),
        }
    }
}

/// Star catalog backed by the API Ninjas `/stars` endpoint.
pub struct NinjaStarCatalog {
    client: Client,
    config: StarCatalogConfig,
}

impl NinjaStarCatalog {
    /// Create a catalog client with the given configuration.
    pub fn new(config: StarCatalogConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        if config.api_key.is_none() {
            warn!(
                subsystem = "catalog",
                "STAR_CATALOG_API_KEY not set; upstream will likely reject requests"
            );
        }
        info!(
            subsystem = "catalog",
            url = %config.base_url,
            timeout_secs = config.timeout_seconds,
            "Initializing star catalog"
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(StarCatalogConfig::from_env())
    }

    pub fn config(&self) -> &StarCatalogConfig {
        &self.config
    }

    async fn query(&self, param: &str, value: &str) -> Result<Vec<StarCandidate>> {
        let start = Instant::now();
        let url = format!("{}/stars", self.config.base_url.trim_end_matches('/'));

        let mut request = self.client.get(&url).query(&[(param, value)]);
        if let Some(key) = &self.config.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await.map_err(|e| {
            warn!(
                subsystem = "catalog",
                op = param,
                error = %e,
                "Star catalog request failed"
            );
            Error::LookupUnavailable(format!("Request failed: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(
                subsystem = "catalog",
                op = param,
                status = status.as_u16(),
                "Star catalog returned an error"
            );
            return Err(Error::LookupUnavailable(format!(
                "Star catalog returned {}: {}",
                status, body
            )));
        }

        let stars: Vec<CatalogStar> = response
            .json()
            .await
            .map_err(|e| Error::LookupUnavailable(format!("Failed to parse response: {}", e)))?;

        let candidates: Vec<StarCandidate> = stars.into_iter().map(StarCandidate::from).collect();
        debug!(
            subsystem = "catalog",
            op = param,
            query = value,
            result_count = candidates.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Star catalog answered"
        );
        Ok(candidates)
    }
}

#[async_trait]
impl StarCatalog for NinjaStarCatalog {
    #[instrument(skip(self), fields(subsystem = "catalog"))]
    async fn fetch_by_name(&self, query: &str) -> Result<Vec<StarCandidate>> {
        self.query("name", query).await
    }

    #[instrument(skip(self), fields(subsystem = "catalog"))]
    async fn fetch_by_constellation(&self, constellation: &str) -> Result<Vec<StarCandidate>> {
        self.query("constellation", constellation).await
    }
}
