//! Core traits for stellaris abstractions.
//!
//! The persistence layer and the external star catalog sit behind these
//! traits so the reconciler can run against PostgreSQL in production and
//! in-memory fakes in tests.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// DISCOVERED STAR REPOSITORY
// =============================================================================

/// Repository for per-user discovered stars.
///
/// Implementations must enforce uniqueness of `(user_id, name)` at the
/// storage level.
#[async_trait]
pub trait DiscoveredStarRepository: Send + Sync {
    /// Exact-match lookup by owner and name.
    async fn find_by_name(&self, user_id: Uuid, name: &str) -> Result<Option<DiscoveredStar>>;

    /// Insert a new star unless `(user_id, name)` already exists.
    ///
    /// Fails with [`crate::Error::ConflictRetried`] when the uniqueness
    /// constraint rejected the row; callers treat that as "already exists"
    /// and re-read.
    async fn insert_if_absent(&self, req: NewDiscoveredStar) -> Result<DiscoveredStar>;

    /// All stars owned by a user, ordered by name.
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<DiscoveredStar>>;
}

// =============================================================================
// STAR NOTE REPOSITORY
// =============================================================================

/// Repository for per-user favorite flags and narratives.
///
/// Mutations have find-or-initialize semantics keyed by `(user_id, star_name)`.
#[async_trait]
pub trait StarNoteRepository: Send + Sync {
    /// Flip the favorite flag, creating the note (favorite, empty narrative)
    /// if it does not exist.
    async fn toggle_favorite(&self, user_id: Uuid, star_name: &str) -> Result<StarNote>;

    /// Replace the narrative and force the favorite flag on (upsert).
    async fn save(&self, user_id: Uuid, star_name: &str, story_chapter: &str) -> Result<StarNote>;

    /// Delete a note. Returns whether a row was removed.
    async fn delete(&self, user_id: Uuid, star_name: &str) -> Result<bool>;

    /// All notes of a user, ordered by star name.
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<StarNote>>;

    /// All notes of a user, most recently updated first.
    async fn list_recent(&self, user_id: Uuid) -> Result<Vec<StarNote>>;
}

// =============================================================================
// STAR CATALOG
// =============================================================================

/// External star catalog.
///
/// An empty vector means the catalog answered and knows nothing; transport
/// and upstream failures are reported as [`crate::Error::LookupUnavailable`].
#[async_trait]
pub trait StarCatalog: Send + Sync {
    /// Look up stars by name.
    async fn fetch_by_name(&self, query: &str) -> Result<Vec<StarCandidate>>;

    /// Look up stars in a constellation.
    async fn fetch_by_constellation(&self, constellation: &str) -> Result<Vec<StarCandidate>>;
}
