//! Favorites and narrative notes.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{StarNote, UserNotes};
use crate::traits::StarNoteRepository;

/// Longest star name accepted for a note.
pub const MAX_STAR_NAME_LEN: usize = 255;

/// Validate and normalize a star name for annotation operations.
///
/// Surrounding whitespace is dropped; the result must be non-empty and at
/// most [`MAX_STAR_NAME_LEN`] characters.
pub fn validate_star_name(star_name: &str) -> Result<&str> {
    let trimmed = star_name.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput("star_name is required".to_string()));
    }
    if trimmed.chars().count() > MAX_STAR_NAME_LEN {
        return Err(Error::InvalidInput(format!(
            "star_name must be {} characters or less",
            MAX_STAR_NAME_LEN
        )));
    }
    Ok(trimmed)
}

/// Per-user favorite flags and narratives keyed by star name.
#[derive(Clone)]
pub struct AnnotationService {
    notes: Arc<dyn StarNoteRepository>,
}

impl AnnotationService {
    pub fn new(notes: Arc<dyn StarNoteRepository>) -> Self {
        Self { notes }
    }

    /// Flip the favorite flag, creating the note on first use.
    pub async fn toggle_favorite(&self, user_id: Uuid, star_name: &str) -> Result<StarNote> {
        let star_name = validate_star_name(star_name)?;
        let note = self.notes.toggle_favorite(user_id, star_name).await?;
        debug!(
            subsystem = "core",
            component = "annotations",
            op = "toggle_favorite",
            user_id = %user_id,
            star_name,
            is_favorite = note.is_favorite,
            "Favorite toggled"
        );
        Ok(note)
    }

    /// Replace the narrative (empty when absent) and mark the star favorite.
    pub async fn save_note(
        &self,
        user_id: Uuid,
        star_name: &str,
        story_chapter: Option<&str>,
    ) -> Result<StarNote> {
        let star_name = validate_star_name(star_name)?;
        self.notes
            .save(user_id, star_name, story_chapter.unwrap_or_default())
            .await
    }

    /// Delete the note if present. Deleting a missing note is a no-op.
    pub async fn remove(&self, user_id: Uuid, star_name: &str) -> Result<()> {
        let star_name = validate_star_name(star_name)?;
        let removed = self.notes.delete(user_id, star_name).await?;
        if !removed {
            debug!(
                subsystem = "core",
                component = "annotations",
                op = "remove",
                user_id = %user_id,
                star_name,
                "No note to remove"
            );
        }
        Ok(())
    }

    /// All notes of a user plus the name-keyed index.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<UserNotes> {
        Ok(UserNotes::new(self.notes.list_for_user(user_id).await?))
    }

    /// Notes ordered by most recently updated, for the observatory page.
    pub async fn observatory(&self, user_id: Uuid) -> Result<Vec<StarNote>> {
        self.notes.list_recent(user_id).await
    }
}
