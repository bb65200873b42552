//! Constellation map handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use stellaris_core::{ConstellationChart, Discovery, StarCandidate};

use crate::handlers::stars::SearchQuery;
use crate::identity::CurrentUser;
use crate::{ApiError, AppState};

/// A star picked from a constellation chart.
#[derive(Debug, Deserialize)]
pub struct DiscoverRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub constellation: Option<String>,
    #[serde(default)]
    pub distance_light_year: Option<f64>,
    #[serde(default)]
    pub spectral_class: Option<String>,
}

impl From<DiscoverRequest> for StarCandidate {
    fn from(req: DiscoverRequest) -> Self {
        StarCandidate {
            name: req.name,
            distance_light_year: req.distance_light_year,
            spectral_class: req.spectral_class,
            constellation: req.constellation,
        }
    }
}

/// Lay out the stars of a constellation, marking the caller's discoveries.
pub async fn search_constellation(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(params): Query<SearchQuery>,
) -> Result<Json<ConstellationChart>, ApiError> {
    Ok(Json(state.charter.chart(&user, &params.query).await?))
}

/// Persist a charted star as discovered.
///
/// # Returns
/// - 201 Created when the star is new to the caller
/// - 200 OK when it was already discovered
/// - 400 Bad Request when the name is missing
pub async fn discover(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<DiscoverRequest>,
) -> Result<(StatusCode, Json<Discovery>), ApiError> {
    let discovery = state.reconciler.discover(&user, body.into()).await?;
    let status = if discovery.is_new_discovery {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(discovery)))
}
