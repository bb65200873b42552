//! Centralized default constants for stellaris.
//!
//! Organized by domain area. Crates reference these instead of repeating
//! literals.

// =============================================================================
// DISCOVERY
// =============================================================================

/// Grouping label used when the catalog does not report a constellation.
pub const UNKNOWN_SECTOR: &str = "Unknown Sector";

/// Spectral class assumed for color mapping when none is known.
pub const SPECTRAL_CLASS: &str = "G";

// =============================================================================
// PRESENTATION PLACEHOLDERS
// =============================================================================

/// Temperature shown for every star (not sourced anywhere).
pub const TEMPERATURE_PLACEHOLDER: &str = "Unknown";

/// Mass shown for every star (not sourced anywhere).
pub const MASS_PLACEHOLDER: &str = "N/A";

/// Diameter shown for every star (not sourced anywhere).
pub const DIAMETER_PLACEHOLDER: &str = "N/A";

/// Render size of the searched star in the scene.
pub const SIZE_VISUAL: f64 = 2.5;

// =============================================================================
// CONSTELLATION CHART
// =============================================================================

/// Radius of the innermost orbit ring.
pub const ORBIT_BASE_RADIUS: f64 = 6.0;

/// Spacing between consecutive orbit rings.
pub const ORBIT_RING_SPACING: f64 = 1.5;

/// Slowest orbit speed.
pub const ORBIT_MIN_SPEED: f64 = 0.1;

/// Speed range added on top of [`ORBIT_MIN_SPEED`].
pub const ORBIT_SPEED_RANGE: f64 = 0.2;

/// Phase offset range.
pub const ORBIT_OFFSET_RANGE: f64 = 10.0;

// =============================================================================
// STAR CATALOG
// =============================================================================

/// Default star catalog base URL.
pub const STAR_CATALOG_URL: &str = "https://api.api-ninjas.com/v1";

/// Timeout for star catalog requests (seconds).
pub const STAR_CATALOG_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// SERVER
// =============================================================================

/// Default database URL.
pub const DATABASE_URL: &str = "postgres://localhost/stellaris";

/// Default listen host.
pub const HOST: &str = "0.0.0.0";

/// Default listen port.
pub const PORT: u16 = 3000;

/// Default requests per rate-limit period.
pub const RATE_LIMIT_REQUESTS: u64 = 100;

/// Default rate-limit period (seconds).
pub const RATE_LIMIT_PERIOD_SECS: u64 = 60;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orbit_constants_are_positive() {
        assert!(ORBIT_BASE_RADIUS > 0.0);
        assert!(ORBIT_RING_SPACING > 0.0);
        assert!(ORBIT_MIN_SPEED > 0.0);
    }

    #[test]
    fn test_default_spectral_class_is_single_letter() {
        assert_eq!(SPECTRAL_CLASS.len(), 1);
    }
}
