//! Data model for stellaris.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::color::spectral_color;
use crate::defaults;
use crate::visual::OrbitPlacement;

// =============================================================================
// IDENTITY
// =============================================================================

/// Request-scoped identity handed in by the session layer.
///
/// Every core operation takes one of these explicitly; nothing in the core
/// remembers who the current user is between calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserContext {
    pub user_id: Uuid,
    /// Display name recorded as the discoverer of new stars.
    pub display_name: String,
}

impl UserContext {
    pub fn new(user_id: Uuid, display_name: impl Into<String>) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
        }
    }
}

// =============================================================================
// DISCOVERED STARS
// =============================================================================

/// A star system known to one user.
///
/// `(user_id, name)` is unique. Rows are created by the reconciler on a
/// first-time hit and never updated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveredStar {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Canonical name as reported by the catalog.
    pub name: String,
    /// Distance in light-years.
    pub distance_ly: Option<f64>,
    /// Spectral classification code, e.g. "A1V".
    pub spectral_class: Option<String>,
    /// Constellation label, `"Unknown Sector"` when the catalog omitted it.
    pub constellation: String,
    /// Display name of the user who discovered it.
    pub discovered_by: String,
    pub created_at: DateTime<Utc>,
}

/// Request for persisting a newly discovered star.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDiscoveredStar {
    pub user_id: Uuid,
    pub name: String,
    pub distance_ly: Option<f64>,
    pub spectral_class: Option<String>,
    pub constellation: String,
    pub discovered_by: String,
}

impl NewDiscoveredStar {
    /// Build a create request from a catalog candidate, applying the
    /// constellation default.
    pub fn from_candidate(user: &UserContext, candidate: &StarCandidate) -> Self {
        Self {
            user_id: user.user_id,
            name: candidate.name.clone(),
            distance_ly: candidate.distance_light_year,
            spectral_class: candidate.spectral_class.clone(),
            constellation: candidate
                .constellation
                .clone()
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| defaults::UNKNOWN_SECTOR.to_string()),
            discovered_by: user.display_name.clone(),
        }
    }
}

/// One record returned by the external star catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarCandidate {
    pub name: String,
    #[serde(default)]
    pub distance_light_year: Option<f64>,
    #[serde(default)]
    pub spectral_class: Option<String>,
    #[serde(default)]
    pub constellation: Option<String>,
}

// =============================================================================
// SEARCH RESULTS
// =============================================================================

/// Normalized star shown to the caller after reconciliation.
///
/// Temperature, mass and diameter are presentation stand-ins, not data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarView {
    pub name: String,
    pub distance_ly: Option<f64>,
    pub spectral_class: Option<String>,
    pub constellation: String,
    pub temperature: String,
    pub mass: String,
    pub diameter: String,
    /// Hex display color derived from the spectral class.
    pub color: String,
    pub size_visual: f64,
}

impl From<&DiscoveredStar> for StarView {
    fn from(star: &DiscoveredStar) -> Self {
        let constellation = if star.constellation.trim().is_empty() {
            defaults::UNKNOWN_SECTOR.to_string()
        } else {
            star.constellation.clone()
        };
        Self {
            name: star.name.clone(),
            distance_ly: star.distance_ly,
            spectral_class: star.spectral_class.clone(),
            constellation,
            temperature: defaults::TEMPERATURE_PLACEHOLDER.to_string(),
            mass: defaults::MASS_PLACEHOLDER.to_string(),
            diameter: defaults::DIAMETER_PLACEHOLDER.to_string(),
            color: spectral_color(star.spectral_class.as_deref()).to_string(),
            size_visual: defaults::SIZE_VISUAL,
        }
    }
}

/// Outcome of a successful resolve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discovery {
    pub star: StarView,
    pub is_new_discovery: bool,
}

// =============================================================================
// ANNOTATIONS
// =============================================================================

/// A user's favorite flag and narrative for a named star.
///
/// Independent of whether the star was ever discovered; at most one per
/// `(user_id, star_name)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarNote {
    pub user_id: Uuid,
    pub star_name: String,
    pub is_favorite: bool,
    /// Free-text narrative, empty when never written.
    pub story_chapter: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// All notes of one user plus a name-keyed index for decorating result lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserNotes {
    pub records: Vec<StarNote>,
    pub by_name: HashMap<String, StarNote>,
}

impl UserNotes {
    pub fn new(records: Vec<StarNote>) -> Self {
        let by_name = records
            .iter()
            .map(|note| (note.star_name.clone(), note.clone()))
            .collect();
        Self { records, by_name }
    }

    pub fn get(&self, star_name: &str) -> Option<&StarNote> {
        self.by_name.get(star_name)
    }

    /// Names of favorited stars, in record order.
    pub fn favorites(&self) -> Vec<String> {
        self.records
            .iter()
            .filter(|note| note.is_favorite)
            .map(|note| note.star_name.clone())
            .collect()
    }
}

// =============================================================================
// DASHBOARD
// =============================================================================

/// Everything the home page shows besides the searched star.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    /// Discovered star names, ascending.
    pub sidebar_list: Vec<String>,
    /// Discovered stars grouped by constellation label.
    pub constellation_groups: BTreeMap<String, Vec<DiscoveredStar>>,
    /// Notes keyed by star name.
    pub notes: HashMap<String, StarNote>,
    /// Names of favorited stars.
    pub favorites: Vec<String>,
}

impl Dashboard {
    /// Assemble the dashboard from the user's stars and notes.
    ///
    /// Stars are sorted by name here so callers may pass them in any order.
    pub fn build(mut stars: Vec<DiscoveredStar>, notes: UserNotes) -> Self {
        stars.sort_by(|a, b| a.name.cmp(&b.name));

        let sidebar_list = stars.iter().map(|s| s.name.clone()).collect();

        let mut constellation_groups: BTreeMap<String, Vec<DiscoveredStar>> = BTreeMap::new();
        for star in stars {
            constellation_groups
                .entry(star.constellation.clone())
                .or_default()
                .push(star);
        }

        let favorites = notes.favorites();
        Self {
            sidebar_list,
            constellation_groups,
            notes: notes.by_name,
            favorites,
        }
    }
}

// =============================================================================
// CONSTELLATION CHART
// =============================================================================

/// One star orbiting the constellation center on the map page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartedStar {
    pub name: String,
    pub distance_ly: Option<f64>,
    pub spectral_class: Option<String>,
    pub color: String,
    /// Whether the user already owns a discovered record with this name.
    pub is_discovered: bool,
    pub orbit: OrbitPlacement,
}

/// Stars of one constellation laid out on orbit rings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstellationChart {
    pub constellation: String,
    pub stars: Vec<ChartedStar>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star(name: &str, constellation: &str) -> DiscoveredStar {
        DiscoveredStar {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            name: name.to_string(),
            distance_ly: Some(4.2),
            spectral_class: Some("M5".to_string()),
            constellation: constellation.to_string(),
            discovered_by: "ada".to_string(),
            created_at: Utc::now(),
        }
    }

    fn note(name: &str, favorite: bool) -> StarNote {
        StarNote {
            user_id: Uuid::nil(),
            star_name: name.to_string(),
            is_favorite: favorite,
            story_chapter: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_new_discovered_star_defaults_constellation() {
        let user = UserContext::new(Uuid::new_v4(), "ada");
        let candidate = StarCandidate {
            name: "Wolf 359".to_string(),
            distance_light_year: Some(7.9),
            spectral_class: Some("M6".to_string()),
            constellation: None,
        };

        let req = NewDiscoveredStar::from_candidate(&user, &candidate);
        assert_eq!(req.constellation, "Unknown Sector");
        assert_eq!(req.discovered_by, "ada");
        assert_eq!(req.user_id, user.user_id);
    }

    #[test]
    fn test_new_discovered_star_treats_blank_constellation_as_missing() {
        let user = UserContext::new(Uuid::new_v4(), "ada");
        let candidate = StarCandidate {
            name: "Wolf 359".to_string(),
            distance_light_year: None,
            spectral_class: None,
            constellation: Some("  ".to_string()),
        };

        let req = NewDiscoveredStar::from_candidate(&user, &candidate);
        assert_eq!(req.constellation, "Unknown Sector");
    }

    #[test]
    fn test_star_view_uses_placeholders() {
        let view = StarView::from(&star("Proxima Centauri", "Centaurus"));
        assert_eq!(view.temperature, "Unknown");
        assert_eq!(view.mass, "N/A");
        assert_eq!(view.diameter, "N/A");
        assert_eq!(view.color, "#ffcc6f");
        assert_eq!(view.size_visual, 2.5);
    }

    #[test]
    fn test_star_view_without_spectral_class_is_g_colored() {
        let mut s = star("Mystery", "Lyra");
        s.spectral_class = None;
        assert_eq!(StarView::from(&s).color, "#fff4ea");
    }

    #[test]
    fn test_user_notes_index_and_favorites() {
        let notes = UserNotes::new(vec![note("Vega", true), note("Deneb", false)]);
        assert!(notes.get("Vega").is_some_and(|n| n.is_favorite));
        assert!(notes.get("Altair").is_none());
        assert_eq!(notes.favorites(), vec!["Vega".to_string()]);
    }

    #[test]
    fn test_dashboard_groups_and_sorts() {
        let stars = vec![
            star("Vega", "Lyra"),
            star("Betelgeuse", "Orion"),
            star("Rigel", "Orion"),
            star("Sheliak", "Lyra"),
        ];
        let dashboard = Dashboard::build(stars, UserNotes::new(vec![note("Rigel", true)]));

        assert_eq!(
            dashboard.sidebar_list,
            vec!["Betelgeuse", "Rigel", "Sheliak", "Vega"]
        );
        let orion: Vec<_> = dashboard.constellation_groups["Orion"]
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(orion, vec!["Betelgeuse", "Rigel"]);
        assert_eq!(dashboard.constellation_groups["Lyra"].len(), 2);
        assert_eq!(dashboard.favorites, vec!["Rigel".to_string()]);
        assert!(dashboard.notes.contains_key("Rigel"));
    }
}
