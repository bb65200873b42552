//! Constellation map charting.
//!
//! Lays the catalog's stars for one constellation out on concentric orbit
//! rings and marks which of them the user has already discovered.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::color::spectral_color;
use crate::error::{Error, Result};
use crate::models::{ChartedStar, ConstellationChart, StarCandidate, UserContext};
use crate::traits::{DiscoveredStarRepository, StarCatalog};
use crate::visual::OrbitPlacement;

/// Builds constellation charts from the catalog and the user's discoveries.
#[derive(Clone)]
pub struct ConstellationCharter {
    stars: Arc<dyn DiscoveredStarRepository>,
    catalog: Arc<dyn StarCatalog>,
}

impl ConstellationCharter {
    pub fn new(stars: Arc<dyn DiscoveredStarRepository>, catalog: Arc<dyn StarCatalog>) -> Self {
        Self { stars, catalog }
    }

    /// Chart `constellation` for `user`.
    ///
    /// Fails with [`Error::StarNotFound`] carrying the label when the catalog
    /// has no stars for it.
    pub async fn chart(&self, user: &UserContext, constellation: &str) -> Result<ConstellationChart> {
        let constellation = constellation.trim();
        if constellation.is_empty() {
            return Err(Error::star_not_found(constellation));
        }

        let candidates = self.catalog.fetch_by_constellation(constellation).await?;
        if candidates.is_empty() {
            debug!(
                subsystem = "core",
                component = "constellations",
                constellation,
                "Catalog returned no stars"
            );
            return Err(Error::star_not_found(constellation));
        }

        let discovered: HashSet<String> = self
            .stars
            .list_for_user(user.user_id)
            .await?
            .into_iter()
            .map(|s| s.name)
            .collect();

        let stars = chart_stars(candidates, &discovered);
        debug!(
            subsystem = "core",
            component = "constellations",
            op = "chart",
            user_id = %user.user_id,
            constellation,
            result_count = stars.len(),
            "Constellation charted"
        );

        Ok(ConstellationChart {
            constellation: constellation.to_string(),
            stars,
        })
    }
}

/// Sort candidates by name, drop duplicate names, and assign orbit rings.
///
/// The ring index follows name order so a star keeps its ring as long as
/// the set of stars does not change.
pub fn chart_stars(
    mut candidates: Vec<StarCandidate>,
    discovered: &HashSet<String>,
) -> Vec<ChartedStar> {
    candidates.retain(|c| !c.name.trim().is_empty());
    candidates.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
    candidates.dedup_by(|a, b| a.name == b.name);

    candidates
        .into_iter()
        .enumerate()
        .map(|(index, candidate)| {
            trace!(star_name = %candidate.name, ring = index, "Placing star");
            ChartedStar {
                color: spectral_color(candidate.spectral_class.as_deref()).to_string(),
                is_discovered: discovered.contains(&candidate.name),
                orbit: OrbitPlacement::for_star(&candidate.name, index),
                name: candidate.name,
                distance_ly: candidate.distance_light_year,
                spectral_class: candidate.spectral_class,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{InMemoryStarRepository, MockStarCatalog};
    use crate::DiscoveryReconciler;
    use uuid::Uuid;

    fn candidate(name: &str, class: &str) -> StarCandidate {
        StarCandidate {
            name: name.to_string(),
            distance_light_year: Some(100.0),
            spectral_class: Some(class.to_string()),
            constellation: Some("Orion".to_string()),
        }
    }

    fn orion() -> Vec<StarCandidate> {
        vec![
            candidate("Rigel", "B8Ia"),
            candidate("betelgeuse", "M1"),
            candidate("Bellatrix", "B2III"),
        ]
    }

    #[test]
    fn test_chart_stars_orders_case_insensitively() {
        let charted = chart_stars(orion(), &HashSet::new());
        let names: Vec<_> = charted.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Bellatrix", "betelgeuse", "Rigel"]);
        assert_eq!(charted[0].orbit.radius, 6.0);
        assert_eq!(charted[1].orbit.radius, 7.5);
        assert_eq!(charted[2].orbit.radius, 9.0);
    }

    #[test]
    fn test_chart_stars_drops_duplicates_and_blanks() {
        let mut input = orion();
        input.push(candidate("Rigel", "B8Ia"));
        input.push(candidate(" ", "G"));

        let charted = chart_stars(input, &HashSet::new());
        assert_eq!(charted.len(), 3);
    }

    #[test]
    fn test_chart_stars_marks_discovered_and_colors() {
        let discovered: HashSet<String> = ["Rigel".to_string()].into_iter().collect();
        let charted = chart_stars(orion(), &discovered);

        let rigel = charted.iter().find(|s| s.name == "Rigel").unwrap();
        assert!(rigel.is_discovered);
        assert_eq!(rigel.color, "#aabfff");
        assert!(charted
            .iter()
            .filter(|s| s.name != "Rigel")
            .all(|s| !s.is_discovered));
    }

    #[tokio::test]
    async fn test_chart_reflects_discoveries() {
        let repo = InMemoryStarRepository::new();
        let catalog = MockStarCatalog::new().with_constellation("Orion", orion());
        let user = UserContext::new(Uuid::new_v4(), "ada");
        let charter = ConstellationCharter::new(Arc::new(repo.clone()), Arc::new(catalog.clone()));
        let reconciler = DiscoveryReconciler::new(Arc::new(repo.clone()), Arc::new(catalog));

        let before = charter.chart(&user, "orion").await.unwrap();
        assert!(before.stars.iter().all(|s| !s.is_discovered));

        reconciler
            .discover(&user, candidate("Bellatrix", "B2III"))
            .await
            .unwrap();

        let after = charter.chart(&user, "orion").await.unwrap();
        assert_eq!(after.constellation, "orion");
        assert!(after.stars[0].is_discovered);
        assert_eq!(after.stars[0].orbit, before.stars[0].orbit);
    }

    #[tokio::test]
    async fn test_unknown_constellation_is_not_found() {
        let charter = ConstellationCharter::new(
            Arc::new(InMemoryStarRepository::new()),
            Arc::new(MockStarCatalog::new()),
        );
        let user = UserContext::new(Uuid::new_v4(), "ada");

        match charter.chart(&user, "Atlantis").await {
            Err(Error::StarNotFound { query }) => assert_eq!(query, "Atlantis"),
            other => panic!("Expected StarNotFound, got {:?}", other),
        }
    }
}
