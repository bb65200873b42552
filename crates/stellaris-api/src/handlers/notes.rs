//! Note (favorite and narrative) handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use stellaris_core::{StarNote, UserNotes};

use crate::identity::CurrentUser;
use crate::{ApiError, AppState};

/// Request body for saving a narrative.
#[derive(Debug, Deserialize)]
pub struct SaveNoteRequest {
    #[serde(default)]
    pub star_name: String,
    /// Omitted or null stores an empty narrative.
    pub story_chapter: Option<String>,
}

pub async fn list_notes(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<UserNotes>, ApiError> {
    Ok(Json(state.annotations.list_for_user(user.user_id).await?))
}

/// Save the narrative of a star. Saving always marks the star favorite.
pub async fn save_note(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<SaveNoteRequest>,
) -> Result<Json<StarNote>, ApiError> {
    let note = state
        .annotations
        .save_note(user.user_id, &body.star_name, body.story_chapter.as_deref())
        .await?;
    Ok(Json(note))
}

/// Delete the note of a star. Returns 204 whether or not it existed.
pub async fn delete_note(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(star_name): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.annotations.remove(user.user_id, &star_name).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// All notes of the caller, most recently updated first.
pub async fn observatory(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<StarNote>>, ApiError> {
    Ok(Json(state.annotations.observatory(user.user_id).await?))
}
