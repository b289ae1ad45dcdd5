//! Artworks
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE artworks (
//!     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
//!     artist_id UUID NOT NULL REFERENCES artists(id) ON DELETE CASCADE,
//!     title VARCHAR(64) NOT NULL,
//!     price BIGINT NOT NULL CHECK (price >= 0),
//!     size_number INTEGER NOT NULL CHECK (size_number BETWEEN 1 AND 500),
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT clock_timestamp(),
//!     updated_at TIMESTAMPTZ NOT NULL DEFAULT clock_timestamp()
//! );
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use std::fmt;
use uuid::Uuid;
use validator::Validate;

use crate::pagination::{like_pattern, search_term, Page, PageWindow, PAGE_SIZE};
use crate::validation::format_thousands;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Artwork {
    pub id: Uuid,
    pub artist_id: Uuid,
    pub title: String,

    /// Whole currency units
    pub price: i64,

    /// Canvas size number, 1 to 500
    pub size_number: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an artwork
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NewArtwork {
    #[validate(length(min = 1, max = 64, message = "Title must be 1 to 64 characters."))]
    pub title: String,

    #[validate(range(min = 0, message = "Price cannot be negative."))]
    pub price: i64,

    #[validate(range(min = 1, max = 500, message = "Size must be between 1 and 500."))]
    pub size_number: i32,
}

/// Artwork row joined with its artist's name for listings
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ArtworkListing {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub artwork: Artwork,
    pub artist_name: String,
}

const ARTWORK_COLUMNS: &str = "id, artist_id, title, price, size_number, created_at, updated_at";

impl Artwork {
    pub async fn create<'e, E>(
        executor: E,
        artist_id: Uuid,
        data: &NewArtwork,
    ) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Artwork>(&format!(
            r#"
            INSERT INTO artworks (artist_id, title, price, size_number)
            VALUES ($1, $2, $3, $4)
            RETURNING {ARTWORK_COLUMNS}
            "#
        ))
        .bind(artist_id)
        .bind(&data.title)
        .bind(data.price)
        .bind(data.size_number)
        .fetch_one(executor)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Artwork>(&format!(
            "SELECT {ARTWORK_COLUMNS} FROM artworks WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// All artworks by one artist, newest first
    pub async fn list_by_artist(pool: &PgPool, artist_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Artwork>(&format!(
            r#"
            SELECT {ARTWORK_COLUMNS} FROM artworks
            WHERE artist_id = $1
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(artist_id)
        .fetch_all(pool)
        .await
    }

    /// Newest-first page of artworks, optionally filtered by a
    /// case-insensitive substring of the title or the artist's name.
    pub async fn list(
        pool: &PgPool,
        search: Option<&str>,
        page: Option<&str>,
    ) -> Result<Page<ArtworkListing>, sqlx::Error> {
        let pattern = search_term(search).map(like_pattern);

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM artworks aw
            JOIN artists ar ON ar.id = aw.artist_id
            WHERE $1::text IS NULL OR aw.title ILIKE $1 OR ar.name ILIKE $1
            "#,
        )
        .bind(&pattern)
        .fetch_one(pool)
        .await?;

        let window = PageWindow::resolve(page, total, PAGE_SIZE);

        let artworks = sqlx::query_as::<_, ArtworkListing>(
            r#"
            SELECT aw.id, aw.artist_id, aw.title, aw.price, aw.size_number,
                   aw.created_at, aw.updated_at, ar.name AS artist_name
            FROM artworks aw
            JOIN artists ar ON ar.id = aw.artist_id
            WHERE $1::text IS NULL OR aw.title ILIKE $1 OR ar.name ILIKE $1
            ORDER BY aw.created_at DESC, aw.id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(&pattern)
        .bind(window.limit)
        .bind(window.offset)
        .fetch_all(pool)
        .await?;

        Ok(window.into_page(artworks, total))
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM artworks")
            .fetch_one(pool)
            .await
    }

    /// Price grouped in thousands, e.g. "1,234,567"
    pub fn formatted_price(&self) -> String {
        format_thousands(self.price)
    }
}

impl fmt::Display for Artwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}
