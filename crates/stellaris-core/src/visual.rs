//! Deterministic visual assignment.
//!
//! Animated stars need a speed and a starting phase that stay the same
//! across independent renders without storing anything per star. Both are
//! derived from [`stable_unit_value`], a pure function of the star's name.

use serde::{Deserialize, Serialize};

use crate::defaults;

/// Map a name to a stable value in `[0, 1)`.
///
/// Rolling hash over UTF-16 code units, `hash = unit + ((hash << 5) - hash)`
/// in 32-bit wrapping arithmetic starting from 0, then `|hash| mod 1000 / 1000`.
pub fn stable_unit_value(name: &str) -> f64 {
    let hash = name.encode_utf16().fold(0i32, |hash, unit| {
        i32::from(unit).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash))
    });
    f64::from((hash % 1000).unsigned_abs()) / 1000.0
}

/// Position of one star on the constellation map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitPlacement {
    /// Ring radius; grows with the star's index in name order.
    pub radius: f64,
    /// Angular speed (radians per second).
    pub speed: f64,
    /// Starting phase (radians).
    pub offset: f64,
}

impl OrbitPlacement {
    /// Placement for the star at `ring_index` (name-sorted) called `name`.
    pub fn for_star(name: &str, ring_index: usize) -> Self {
        let v = stable_unit_value(name);
        Self {
            radius: defaults::ORBIT_BASE_RADIUS + ring_index as f64 * defaults::ORBIT_RING_SPACING,
            speed: defaults::ORBIT_MIN_SPEED + v * defaults::ORBIT_SPEED_RANGE,
            offset: v * defaults::ORBIT_OFFSET_RANGE,
        }
    }
}
