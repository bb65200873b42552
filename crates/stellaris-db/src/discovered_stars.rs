//! Discovered star repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};
use tracing::debug;
use uuid::Uuid;

use stellaris_core::{DiscoveredStar, DiscoveredStarRepository, Error, NewDiscoveredStar, Result};

const STAR_COLUMNS: &str =
    "id, user_id, name, distance_ly, spectral_class, constellation, discovered_by, created_at";

fn star_from_row(row: &PgRow) -> DiscoveredStar {
    DiscoveredStar {
        id: row.get("id"),
        user_id: row.get("user_id"),
        name: row.get("name"),
        distance_ly: row.get("distance_ly"),
        spectral_class: row.get("spectral_class"),
        constellation: row.get("constellation"),
        discovered_by: row.get("discovered_by"),
        created_at: row.get("created_at"),
    }
}

/// PostgreSQL implementation of DiscoveredStarRepository.
#[derive(Clone)]
pub struct PgDiscoveredStarRepository {
    pool: Pool<Postgres>,
}

impl PgDiscoveredStarRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DiscoveredStarRepository for PgDiscoveredStarRepository {
    async fn find_by_name(&self, user_id: Uuid, name: &str) -> Result<Option<DiscoveredStar>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM discovered_star WHERE user_id = $1 AND name = $2",
            STAR_COLUMNS
        ))
        .bind(user_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.as_ref().map(star_from_row))
    }

    async fn insert_if_absent(&self, req: NewDiscoveredStar) -> Result<DiscoveredStar> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO discovered_star
                (id, user_id, name, distance_ly, spectral_class, constellation, discovered_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (user_id, name) DO NOTHING
            RETURNING {}
            "#,
            STAR_COLUMNS
        ))
        .bind(Uuid::now_v7())
        .bind(req.user_id)
        .bind(&req.name)
        .bind(req.distance_ly)
        .bind(&req.spectral_class)
        .bind(&req.constellation)
        .bind(&req.discovered_by)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        match row {
            Some(row) => Ok(star_from_row(&row)),
            None => {
                debug!(
                    subsystem = "database",
                    component = "discovered_stars",
                    op = "insert_if_absent",
                    user_id = %req.user_id,
                    star_name = %req.name,
                    "Uniqueness constraint rejected insert"
                );
                Err(Error::ConflictRetried {
                    user_id: req.user_id,
                    name: req.name,
                })
            }
        }
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<DiscoveredStar>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM discovered_star WHERE user_id = $1 ORDER BY name",
            STAR_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows.iter().map(star_from_row).collect())
    }
}
