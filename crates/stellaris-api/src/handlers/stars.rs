//! Star search, dashboard and favorite handlers.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use stellaris_core::{load_dashboard, Dashboard, StarNote, StarView};

use crate::identity::CurrentUser;
use crate::{ApiError, AppState};

/// Query parameters shared by the search endpoints.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
}

/// Response of a star search: the resolved star plus a refreshed dashboard.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub searched_star: StarView,
    pub is_new_discovery: bool,
    pub dashboard: Dashboard,
}

#[derive(Debug, Deserialize)]
pub struct FavoriteRequest {
    #[serde(default)]
    pub star_name: String,
}

/// Sidebar, constellation groups, notes and favorites of the caller.
pub async fn get_dashboard(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Dashboard>, ApiError> {
    let dashboard = load_dashboard(&*state.stars, &*state.notes, user.user_id).await?;
    Ok(Json(dashboard))
}

/// Resolve a star by name, discovering it on the first hit.
///
/// # Returns
/// - 200 OK with the normalized star and the refreshed dashboard
/// - 404 Not Found with `TARGET_NOT_FOUND` when nothing matched
/// - 503 Service Unavailable when the star catalog could not be asked
pub async fn search_star(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(params): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    let discovery = state.reconciler.resolve(&user, &params.query).await?;
    let dashboard = load_dashboard(&*state.stars, &*state.notes, user.user_id).await?;

    Ok(Json(SearchResponse {
        searched_star: discovery.star,
        is_new_discovery: discovery.is_new_discovery,
        dashboard,
    }))
}

/// Flip the favorite flag of a star, creating its note on first use.
pub async fn toggle_favorite(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<FavoriteRequest>,
) -> Result<Json<StarNote>, ApiError> {
    let note = state
        .annotations
        .toggle_favorite(user.user_id, &body.star_name)
        .await?;
    Ok(Json(note))
}
