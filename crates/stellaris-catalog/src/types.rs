//! Wire types for the star catalog responses.

use serde::{Deserialize, Deserializer};
use stellaris_core::StarCandidate;

/// One entry of a `/stars` response.
///
/// The upstream reports numeric fields as strings (`"8.6"`) on some records
/// and as numbers on others; both are accepted. Unparseable values become
/// `None` rather than failing the whole response.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogStar {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub constellation: Option<String>,
    #[serde(default)]
    pub spectral_class: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub distance_light_year: Option<f64>,
}

impl From<CatalogStar> for StarCandidate {
    fn from(star: CatalogStar) -> Self {
        StarCandidate {
            name: star.name.trim().to_string(),
            distance_light_year: star.distance_light_year,
            spectral_class: non_blank(star.spectral_class),
            constellation: non_blank(star.constellation),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}
