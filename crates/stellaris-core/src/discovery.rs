//! Discovery reconciliation.
//!
//! Resolves a user's star query to a normalized record, discovering and
//! persisting it on the first hit.
//!
//! ## Resolution Order
//!
//! 1. Exact local match on `(user, query)`
//! 2. External catalog lookup by `query` (empty answer is `StarNotFound`)
//! 3. Local match on `(user, canonical name)` from the first candidate
//! 4. Insert guarded by the `(user, name)` uniqueness constraint; losing a
//!    concurrent race re-reads the winner's row
//!
//! The reconciler keeps no state between calls.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, instrument};

use crate::error::{Error, Result};
use crate::models::{
    DiscoveredStar, Discovery, NewDiscoveredStar, StarCandidate, StarView, UserContext,
};
use crate::traits::{DiscoveredStarRepository, StarCatalog};

/// Resolves star queries against the local store and the external catalog.
#[derive(Clone)]
pub struct DiscoveryReconciler {
    stars: Arc<dyn DiscoveredStarRepository>,
    catalog: Arc<dyn StarCatalog>,
}

impl DiscoveryReconciler {
    pub fn new(stars: Arc<dyn DiscoveredStarRepository>, catalog: Arc<dyn StarCatalog>) -> Self {
        Self { stars, catalog }
    }

    /// Resolve `query` for `user`.
    ///
    /// Fails with [`Error::StarNotFound`] carrying the trimmed query when the
    /// catalog has no candidate, and passes [`Error::LookupUnavailable`]
    /// through when the catalog could not be asked.
    #[instrument(skip(self, user), fields(subsystem = "core", component = "reconciler", op = "resolve", user_id = %user.user_id))]
    pub async fn resolve(&self, user: &UserContext, query: &str) -> Result<Discovery> {
        let start = Instant::now();
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::star_not_found(query));
        }

        if let Some(local) = self.stars.find_by_name(user.user_id, query).await? {
            debug!(star_name = %local.name, "Resolved from local store");
            return Ok(Self::normalize(&local, false));
        }

        let candidates = self.catalog.fetch_by_name(query).await?;
        let candidate = match candidates.into_iter().next() {
            Some(c) if !c.name.trim().is_empty() => c,
            _ => {
                debug!(query, "Catalog returned no candidate");
                return Err(Error::star_not_found(query));
            }
        };

        let (star, is_new_discovery) = self.adopt(user, &candidate).await?;

        debug!(
            query,
            star_name = %star.name,
            is_new_discovery,
            duration_ms = start.elapsed().as_millis() as u64,
            "Resolve complete"
        );
        Ok(Self::normalize(&star, is_new_discovery))
    }

    /// Persist a candidate the user picked from a constellation chart.
    ///
    /// Goes through the same find-or-create path as [`Self::resolve`].
    #[instrument(skip(self, user, candidate), fields(subsystem = "core", component = "reconciler", op = "discover", user_id = %user.user_id))]
    pub async fn discover(&self, user: &UserContext, candidate: StarCandidate) -> Result<Discovery> {
        let name = candidate.name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput("name is required".to_string()));
        }
        let candidate = StarCandidate {
            name: name.to_string(),
            ..candidate
        };

        let (star, is_new_discovery) = self.adopt(user, &candidate).await?;
        Ok(Self::normalize(&star, is_new_discovery))
    }

    /// Find the candidate's canonical name locally or insert it.
    ///
    /// Returns the stored row and whether this call created it.
    async fn adopt(
        &self,
        user: &UserContext,
        candidate: &StarCandidate,
    ) -> Result<(DiscoveredStar, bool)> {
        // The catalog may canonicalize ("Sirius" -> "Sirius A, B"); the
        // canonical name can already be stored under a different query.
        if let Some(existing) = self.stars.find_by_name(user.user_id, &candidate.name).await? {
            debug!(star_name = %existing.name, "Canonical name already discovered");
            return Ok((existing, false));
        }

        let req = NewDiscoveredStar::from_candidate(user, candidate);
        match self.stars.insert_if_absent(req).await {
            Ok(star) => {
                info!(
                    user_id = %user.user_id,
                    star_name = %star.name,
                    constellation = %star.constellation,
                    "New star discovered"
                );
                Ok((star, true))
            }
            Err(e) if e.is_unique_violation() => {
                debug!(error = %e, "Lost insert race, re-reading existing row");
                self.reread_after_conflict(user, &candidate.name).await
            }
            Err(e) => Err(e),
        }
    }

    async fn reread_after_conflict(
        &self,
        user: &UserContext,
        name: &str,
    ) -> Result<(DiscoveredStar, bool)> {
        match self.stars.find_by_name(user.user_id, name).await? {
            Some(existing) => Ok((existing, false)),
            None => Err(Error::Internal(format!(
                "star '{}' rejected as duplicate but not found on re-read",
                name
            ))),
        }
    }

    fn normalize(star: &DiscoveredStar, is_new_discovery: bool) -> Discovery {
        Discovery {
            star: StarView::from(star),
            is_new_discovery,
        }
    }
}
