//! # stellaris-core
//!
//! Core types, traits, and discovery logic for the stellaris star browser.
//!
//! This crate holds everything that does not touch a socket or a database:
//! the data model, the repository and catalog traits, the discovery
//! reconciler, the annotation service, and the pure presentation helpers
//! (spectral colors and stable orbit placement).

pub mod annotations;
pub mod color;
pub mod constellations;
pub mod dashboard;
pub mod defaults;
pub mod discovery;
pub mod error;
pub mod logging;
pub mod models;
pub mod traits;
pub mod visual;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types at crate root
pub use annotations::AnnotationService;
pub use color::spectral_color;
pub use constellations::ConstellationCharter;
pub use dashboard::load_dashboard;
pub use discovery::DiscoveryReconciler;
pub use error::{Error, Result};
pub use models::*;
pub use traits::*;
pub use visual::{stable_unit_value, OrbitPlacement};
