//! Star note repository implementation.
//!
//! Every mutation is a single upsert on the `(user_id, star_name)` primary
//! key, so concurrent toggles and saves never create a second row.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use stellaris_core::{Error, Result, StarNote, StarNoteRepository};

const NOTE_COLUMNS: &str = "user_id, star_name, is_favorite, story_chapter, created_at, updated_at";

fn note_from_row(row: &PgRow) -> StarNote {
    StarNote {
        user_id: row.get("user_id"),
        star_name: row.get("star_name"),
        is_favorite: row.get("is_favorite"),
        story_chapter: row.get("story_chapter"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// PostgreSQL implementation of StarNoteRepository.
#[derive(Clone)]
pub struct PgStarNoteRepository {
    pool: Pool<Postgres>,
}

impl PgStarNoteRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StarNoteRepository for PgStarNoteRepository {
    async fn toggle_favorite(&self, user_id: Uuid, star_name: &str) -> Result<StarNote> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO star_note (user_id, star_name, is_favorite, story_chapter, created_at, updated_at)
            VALUES ($1, $2, TRUE, '', $3, $3)
            ON CONFLICT (user_id, star_name) DO UPDATE
            SET is_favorite = NOT star_note.is_favorite,
                updated_at = EXCLUDED.updated_at
            RETURNING {}
            "#,
            NOTE_COLUMNS
        ))
        .bind(user_id)
        .bind(star_name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(note_from_row(&row))
    }

    async fn save(&self, user_id: Uuid, star_name: &str, story_chapter: &str) -> Result<StarNote> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO star_note (user_id, star_name, is_favorite, story_chapter, created_at, updated_at)
            VALUES ($1, $2, TRUE, $3, $4, $4)
            ON CONFLICT (user_id, star_name) DO UPDATE
            SET is_favorite = TRUE,
                story_chapter = EXCLUDED.story_chapter,
                updated_at = EXCLUDED.updated_at
            RETURNING {}
            "#,
            NOTE_COLUMNS
        ))
        .bind(user_id)
        .bind(star_name)
        .bind(story_chapter)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(note_from_row(&row))
    }

    async fn delete(&self, user_id: Uuid, star_name: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM star_note WHERE user_id = $1 AND star_name = $2")
            .bind(user_id)
            .bind(star_name)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<StarNote>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM star_note WHERE user_id = $1 ORDER BY star_name",
            NOTE_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows.iter().map(note_from_row).collect())
    }

    async fn list_recent(&self, user_id: Uuid) -> Result<Vec<StarNote>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM star_note WHERE user_id = $1 ORDER BY updated_at DESC, star_name",
            NOTE_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows.iter().map(note_from_row).collect())
    }
}
