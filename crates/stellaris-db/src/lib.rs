//! # stellaris-db
//!
//! PostgreSQL database layer for stellaris.
//!
//! This crate provides:
//! - Connection pool management
//! - Repository implementations for discovered stars and star notes
//! - Embedded schema migrations
//!
//! ## Example
//!
//! ```rust,ignore
//! use stellaris_db::{Database, DiscoveredStarRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/stellaris").await?;
//!     db.migrate().await?;
//!
//!     let stars = db.stars.list_for_user(user_id).await?;
//!     println!("{} stars discovered", stars.len());
//!     Ok(())
//! }
//! ```
pub mod discovered_stars;
pub mod pool;
pub mod star_notes;

// Test fixtures for integration tests
// Note: Always compiled so integration tests (in tests/) can use DEFAULT_TEST_DATABASE_URL
pub mod test_fixtures;

// Re-export core types
pub use stellaris_core::*;

pub use discovered_stars::PgDiscoveredStarRepository;
pub use pool::{create_pool, create_pool_with_config, PoolConfig};
pub use star_notes::PgStarNoteRepository;

/// Combined database context with all repositories.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Discovered stars, unique per (user, name).
    pub stars: PgDiscoveredStarRepository,
    /// Favorite flags and narratives.
    pub notes: PgStarNoteRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            stars: PgDiscoveredStarRepository::new(pool.clone()),
            notes: PgStarNoteRepository::new(pool.clone()),
            pool,
        }
    }

    /// Create a new Database instance by connecting to the given URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.pool
    }
}
