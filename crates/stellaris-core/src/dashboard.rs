//! Home page aggregation.

use uuid::Uuid;

use crate::error::Result;
use crate::models::{Dashboard, UserNotes};
use crate::traits::{DiscoveredStarRepository, StarNoteRepository};

/// Load the sidebar, constellation groups, and notes of a user.
pub async fn load_dashboard(
    stars: &dyn DiscoveredStarRepository,
    notes: &dyn StarNoteRepository,
    user_id: Uuid,
) -> Result<Dashboard> {
    let discovered = stars.list_for_user(user_id).await?;
    let notes = UserNotes::new(notes.list_for_user(user_id).await?);
    Ok(Dashboard::build(discovered, notes))
}
