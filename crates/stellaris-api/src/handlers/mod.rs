//! HTTP handlers for stellaris-api.

pub mod constellations;
pub mod notes;
pub mod stars;
pub mod system;
