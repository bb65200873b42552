//! # stellaris-catalog
//!
//! Client for the external star catalog (API Ninjas `/stars`).
//!
//! The catalog is consulted on a local miss by the discovery reconciler and
//! for every constellation chart. It implements
//! [`stellaris_core::StarCatalog`], so callers depend only on the trait.
//!
//! # Example
//!
//! ```rust,no_run
//! use stellaris_catalog::NinjaStarCatalog;
//! use stellaris_core::StarCatalog;
//!
//! #[tokio::main]
//! async fn main() {
//!     let catalog = NinjaStarCatalog::from_env().unwrap();
//!     let stars = catalog.fetch_by_name("Sirius").await.unwrap();
//!     println!("{} candidates", stars.len());
//! }
//! ```

pub mod client;
pub mod types;

pub use client::{NinjaStarCatalog, StarCatalogConfig};
pub use types::CatalogStar;
