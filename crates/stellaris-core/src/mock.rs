//! In-memory repositories and a scripted star catalog for deterministic testing.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use stellaris_core::mock::{InMemoryStarRepository, MockStarCatalog};
//! use stellaris_core::DiscoveryReconciler;
//!
//! let catalog = MockStarCatalog::new().with_star("Sirius", "Sirius A, B", 8.6, "A", "Canis Major");
//! let reconciler = DiscoveryReconciler::new(
//!     Arc::new(InMemoryStarRepository::new()),
//!     Arc::new(catalog),
//! );
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{DiscoveredStar, NewDiscoveredStar, StarCandidate, StarNote};
use crate::traits::{DiscoveredStarRepository, StarCatalog, StarNoteRepository};

// =============================================================================
// DISCOVERED STARS
// =============================================================================

/// Discovered-star store honoring the `(user_id, name)` uniqueness rule.
#[derive(Clone, Default)]
pub struct InMemoryStarRepository {
    rows: Arc<Mutex<Vec<DiscoveredStar>>>,
    /// When set, the next insert loses a race against a concurrent request.
    race_next_insert: Arc<Mutex<bool>>,
}

impl InMemoryStarRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a row directly, bypassing the reconciler.
    pub fn with_star(self, star: DiscoveredStar) -> Self {
        self.rows.lock().unwrap().push(star);
        self
    }

    /// Make the next `insert_if_absent` behave as if another request inserted
    /// the same `(user_id, name)` between the re-check and the insert.
    pub fn race_next_insert(&self) {
        *self.race_next_insert.lock().unwrap() = true;
    }

    /// Snapshot of all stored rows.
    pub fn rows(&self) -> Vec<DiscoveredStar> {
        self.rows.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn materialize(req: NewDiscoveredStar) -> DiscoveredStar {
    DiscoveredStar {
        id: Uuid::now_v7(),
        user_id: req.user_id,
        name: req.name,
        distance_ly: req.distance_ly,
        spectral_class: req.spectral_class,
        constellation: req.constellation,
        discovered_by: req.discovered_by,
        created_at: Utc::now(),
    }
}

#[async_trait]
impl DiscoveredStarRepository for InMemoryStarRepository {
    async fn find_by_name(&self, user_id: Uuid, name: &str) -> Result<Option<DiscoveredStar>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.user_id == user_id && s.name == name)
            .cloned())
    }

    async fn insert_if_absent(&self, req: NewDiscoveredStar) -> Result<DiscoveredStar> {
        let raced = std::mem::take(&mut *self.race_next_insert.lock().unwrap());
        let mut rows = self.rows.lock().unwrap();
        let conflict = Error::ConflictRetried {
            user_id: req.user_id,
            name: req.name.clone(),
        };

        if rows
            .iter()
            .any(|s| s.user_id == req.user_id && s.name == req.name)
        {
            return Err(conflict);
        }
        if raced {
            let mut winner = materialize(req);
            winner.discovered_by = "concurrent request".to_string();
            rows.push(winner);
            return Err(conflict);
        }

        let star = materialize(req);
        rows.push(star.clone());
        Ok(star)
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<DiscoveredStar>> {
        let mut stars: Vec<_> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        stars.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(stars)
    }
}

// =============================================================================
// STAR NOTES
// =============================================================================

/// Note store keyed by `(user_id, star_name)`.
#[derive(Clone, Default)]
pub struct InMemoryStarNoteRepository {
    notes: Arc<Mutex<HashMap<(Uuid, String), StarNote>>>,
}

impl InMemoryStarNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.notes.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn upsert(
        &self,
        user_id: Uuid,
        star_name: &str,
        apply: impl FnOnce(Option<&StarNote>) -> (bool, String),
    ) -> StarNote {
        let mut notes = self.notes.lock().unwrap();
        let key = (user_id, star_name.to_string());
        let now = Utc::now();

        let existing = notes.get(&key);
        let created_at = existing.map(|n| n.created_at).unwrap_or(now);
        let (is_favorite, story_chapter) = apply(existing);

        let note = StarNote {
            user_id,
            star_name: star_name.to_string(),
            is_favorite,
            story_chapter,
            created_at,
            updated_at: now,
        };
        notes.insert(key, note.clone());
        note
    }
}

#[async_trait]
impl StarNoteRepository for InMemoryStarNoteRepository {
    async fn toggle_favorite(&self, user_id: Uuid, star_name: &str) -> Result<StarNote> {
        Ok(self.upsert(user_id, star_name, |existing| match existing {
            Some(n) => (!n.is_favorite, n.story_chapter.clone()),
            None => (true, String::new()),
        }))
    }

    async fn save(&self, user_id: Uuid, star_name: &str, story_chapter: &str) -> Result<StarNote> {
        Ok(self.upsert(user_id, star_name, |_| (true, story_chapter.to_string())))
    }

    async fn delete(&self, user_id: Uuid, star_name: &str) -> Result<bool> {
        Ok(self
            .notes
            .lock()
            .unwrap()
            .remove(&(user_id, star_name.to_string()))
            .is_some())
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<StarNote>> {
        let mut notes: Vec<_> = self
            .notes
            .lock()
            .unwrap()
            .values()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        notes.sort_by(|a, b| a.star_name.cmp(&b.star_name));
        Ok(notes)
    }

    async fn list_recent(&self, user_id: Uuid) -> Result<Vec<StarNote>> {
        let mut notes = self.list_for_user(user_id).await?;
        notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(notes)
    }
}

// =============================================================================
// STAR CATALOG
// =============================================================================

/// Scripted star catalog.
///
/// Unknown queries answer with an empty list. Query matching is
/// case-insensitive, like the real catalog.
#[derive(Clone, Default)]
pub struct MockStarCatalog {
    by_name: HashMap<String, Vec<StarCandidate>>,
    by_constellation: HashMap<String, Vec<StarCandidate>>,
    unavailable: bool,
    call_log: Arc<Mutex<Vec<String>>>,
}

impl MockStarCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `query` with a single star named `canonical_name`.
    pub fn with_star(
        self,
        query: &str,
        canonical_name: &str,
        distance_light_year: f64,
        spectral_class: &str,
        constellation: &str,
    ) -> Self {
        self.with_candidates(
            query,
            vec![StarCandidate {
                name: canonical_name.to_string(),
                distance_light_year: Some(distance_light_year),
                spectral_class: Some(spectral_class.to_string()),
                constellation: Some(constellation.to_string()),
            }],
        )
    }

    /// Answer `query` with an arbitrary candidate list.
    pub fn with_candidates(mut self, query: &str, candidates: Vec<StarCandidate>) -> Self {
        self.by_name.insert(query.to_lowercase(), candidates);
        self
    }

    /// Answer a constellation lookup.
    pub fn with_constellation(mut self, constellation: &str, candidates: Vec<StarCandidate>) -> Self {
        self.by_constellation
            .insert(constellation.to_lowercase(), candidates);
        self
    }

    /// Fail every lookup as if the upstream were down.
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    /// Queries received so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.call_log.lock().unwrap().clone()
    }

    fn answer(
        &self,
        table: &HashMap<String, Vec<StarCandidate>>,
        query: &str,
    ) -> Result<Vec<StarCandidate>> {
        self.call_log.lock().unwrap().push(query.to_string());
        if self.unavailable {
            return Err(Error::LookupUnavailable("mock catalog is down".to_string()));
        }
        Ok(table.get(&query.to_lowercase()).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl StarCatalog for MockStarCatalog {
    async fn fetch_by_name(&self, query: &str) -> Result<Vec<StarCandidate>> {
        self.answer(&self.by_name, query)
    }

    async fn fetch_by_constellation(&self, constellation: &str) -> Result<Vec<StarCandidate>> {
        self.answer(&self.by_constellation, constellation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserContext;

    fn new_star(user_id: Uuid, name: &str) -> NewDiscoveredStar {
        NewDiscoveredStar::from_candidate(
            &UserContext::new(user_id, "ada"),
            &StarCandidate {
                name: name.to_string(),
                distance_light_year: None,
                spectral_class: None,
                constellation: None,
            },
        )
    }

    #[tokio::test]
    async fn test_duplicate_insert_signals_conflict() {
        let repo = InMemoryStarRepository::new();
        let user_id = Uuid::new_v4();

        repo.insert_if_absent(new_star(user_id, "Vega")).await.unwrap();
        let err = repo
            .insert_if_absent(new_star(user_id, "Vega"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::ConflictRetried { ref name, .. } if name == "Vega"));
        assert!(err.is_unique_violation());
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_raced_insert_stores_winner_and_signals_conflict() {
        let repo = InMemoryStarRepository::new();
        let user_id = Uuid::new_v4();
        repo.race_next_insert();

        let err = repo
            .insert_if_absent(new_star(user_id, "Deneb"))
            .await
            .unwrap_err();

        assert!(err.is_unique_violation());
        assert_eq!(repo.rows()[0].discovered_by, "concurrent request");
    }
}
