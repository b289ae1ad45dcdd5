//! Exhibitions and their artwork links
//!
//! An exhibition belongs to one artist and groups a curated subset of that
//! artist's own artworks through `exhibition_artworks`.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE exhibitions (
//!     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
//!     artist_id UUID NOT NULL REFERENCES artists(id) ON DELETE CASCADE,
//!     title VARCHAR(64) NOT NULL,
//!     start_date DATE NOT NULL,
//!     end_date DATE NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT clock_timestamp(),
//!     updated_at TIMESTAMPTZ NOT NULL DEFAULT clock_timestamp()
//! );
//!
//! CREATE TABLE exhibition_artworks (
//!     exhibition_id UUID NOT NULL REFERENCES exhibitions(id) ON DELETE CASCADE,
//!     artwork_id UUID NOT NULL REFERENCES artworks(id) ON DELETE CASCADE,
//!     added_at TIMESTAMPTZ NOT NULL DEFAULT clock_timestamp(),
//!     PRIMARY KEY (exhibition_id, artwork_id)
//! );
//! ```
//!
//! The schema alone does not stop cross-artist links; [`ExhibitionArtwork::link`]
//! only inserts when both rows share an artist.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use std::fmt;
use tracing::{info, warn};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::artwork::Artwork;
use crate::pagination::{like_pattern, search_term, Page, PageWindow, PAGE_SIZE};

#[derive(Debug, thiserror::Error)]
pub enum ExhibitionError {
    #[error("select at least one artwork")]
    NoArtworksSelected,

    #[error("end date precedes start date")]
    InvalidDateRange,

    /// Missing artwork, or one owned by another artist
    #[error("artwork {0} not found for this artist")]
    ArtworkNotFound(Uuid),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Exhibition {
    pub id: Uuid,
    pub artist_id: Uuid,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an exhibition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_date_range", skip_on_field_errors = false))]
pub struct NewExhibition {
    #[validate(length(min = 1, max = 64, message = "Title must be 1 to 64 characters."))]
    pub title: String,

    pub start_date: NaiveDate,

    pub end_date: NaiveDate,
}

fn validate_date_range(data: &NewExhibition) -> Result<(), ValidationError> {
    if data.end_date < data.start_date {
        let mut err = ValidationError::new("date_range");
        err.message = Some("End date cannot be earlier than the start date.".into());
        return Err(err);
    }
    Ok(())
}

/// Join row between an exhibition and one of its artist's artworks
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ExhibitionArtwork {
    pub exhibition_id: Uuid,
    pub artwork_id: Uuid,
    pub added_at: DateTime<Utc>,
}

/// Exhibition row with its artist's name and artwork count, for listings
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ExhibitionListing {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub exhibition: Exhibition,
    pub artist_name: String,
    pub artwork_count: i64,
}

const EXHIBITION_COLUMNS: &str =
    "id, artist_id, title, start_date, end_date, created_at, updated_at";

impl Exhibition {
    /// Creates an exhibition for `artist_id` and links every selected
    /// artwork, all in one transaction.
    ///
    /// Duplicate ids are linked once. If any id is unknown or belongs to a
    /// different artist the whole creation is rolled back.
    pub async fn create_with_artworks(
        pool: &PgPool,
        artist_id: Uuid,
        data: &NewExhibition,
        artwork_ids: &[Uuid],
    ) -> Result<Self, ExhibitionError> {
        if data.end_date < data.start_date {
            return Err(ExhibitionError::InvalidDateRange);
        }

        let mut selected: Vec<Uuid> = Vec::with_capacity(artwork_ids.len());
        for id in artwork_ids {
            if !selected.contains(id) {
                selected.push(*id);
            }
        }

        if selected.is_empty() {
            return Err(ExhibitionError::NoArtworksSelected);
        }

        let mut tx = pool.begin().await?;

        let exhibition = sqlx::query_as::<_, Exhibition>(&format!(
            r#"
            INSERT INTO exhibitions (artist_id, title, start_date, end_date)
            VALUES ($1, $2, $3, $4)
            RETURNING {EXHIBITION_COLUMNS}
            "#
        ))
        .bind(artist_id)
        .bind(&data.title)
        .bind(data.start_date)
        .bind(data.end_date)
        .fetch_one(&mut *tx)
        .await?;

        for artwork_id in &selected {
            if ExhibitionArtwork::link(&mut *tx, exhibition.id, *artwork_id)
                .await?
                .is_none()
            {
                warn!(
                    exhibition_id = %exhibition.id,
                    artwork_id = %artwork_id,
                    artist_id = %artist_id,
                    "Rejected artwork outside the artist's collection"
                );
                tx.rollback().await?;
                return Err(ExhibitionError::ArtworkNotFound(*artwork_id));
            }
        }

        tx.commit().await?;

        info!(
            exhibition_id = %exhibition.id,
            artist_id = %artist_id,
            artworks = selected.len(),
            "Exhibition created"
        );

        Ok(exhibition)
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Exhibition>(&format!(
            "SELECT {EXHIBITION_COLUMNS} FROM exhibitions WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// All exhibitions by one artist, newest first
    pub async fn list_by_artist(pool: &PgPool, artist_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Exhibition>(&format!(
            r#"
            SELECT {EXHIBITION_COLUMNS} FROM exhibitions
            WHERE artist_id = $1
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(artist_id)
        .fetch_all(pool)
        .await
    }

    /// Newest-first page of exhibitions, optionally filtered by a
    /// case-insensitive substring of the title or the artist's name.
    pub async fn list(
        pool: &PgPool,
        search: Option<&str>,
        page: Option<&str>,
    ) -> Result<Page<ExhibitionListing>, sqlx::Error> {
        let pattern = search_term(search).map(like_pattern);

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM exhibitions e
            JOIN artists ar ON ar.id = e.artist_id
            WHERE $1::text IS NULL OR e.title ILIKE $1 OR ar.name ILIKE $1
            "#,
        )
        .bind(&pattern)
        .fetch_one(pool)
        .await?;

        let window = PageWindow::resolve(page, total, PAGE_SIZE);

        let exhibitions = sqlx::query_as::<_, ExhibitionListing>(
            r#"
            SELECT e.id, e.artist_id, e.title, e.start_date, e.end_date,
                   e.created_at, e.updated_at,
                   ar.name AS artist_name,
                   (SELECT COUNT(*) FROM exhibition_artworks ea
                    WHERE ea.exhibition_id = e.id) AS artwork_count
            FROM exhibitions e
            JOIN artists ar ON ar.id = e.artist_id
            WHERE $1::text IS NULL OR e.title ILIKE $1 OR ar.name ILIKE $1
            ORDER BY e.created_at DESC, e.id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(&pattern)
        .bind(window.limit)
        .bind(window.offset)
        .fetch_all(pool)
        .await?;

        Ok(window.into_page(exhibitions, total))
    }

    /// Artworks shown in `exhibition_id`, in the order they were added
    pub async fn artworks(pool: &PgPool, exhibition_id: Uuid) -> Result<Vec<Artwork>, sqlx::Error> {
        sqlx::query_as::<_, Artwork>(
            r#"
            SELECT aw.id, aw.artist_id, aw.title, aw.price, aw.size_number,
                   aw.created_at, aw.updated_at
            FROM exhibition_artworks ea
            JOIN artworks aw ON aw.id = ea.artwork_id
            WHERE ea.exhibition_id = $1
            ORDER BY ea.added_at, aw.id
            "#,
        )
        .bind(exhibition_id)
        .fetch_all(pool)
        .await
    }
}

impl fmt::Display for Exhibition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} ~ {})", self.title, self.start_date, self.end_date)
    }
}

impl ExhibitionArtwork {
    /// Links `artwork_id` into `exhibition_id` if both belong to the same
    /// artist.
    ///
    /// Returns `None` when the artwork is missing or owned by someone else.
    /// Linking an already linked pair is a primary key violation.
    pub async fn link<'e, E>(
        executor: E,
        exhibition_id: Uuid,
        artwork_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, ExhibitionArtwork>(
            r#"
            INSERT INTO exhibition_artworks (exhibition_id, artwork_id)
            SELECT e.id, aw.id
            FROM exhibitions e
            JOIN artworks aw ON aw.artist_id = e.artist_id
            WHERE e.id = $1 AND aw.id = $2
            RETURNING exhibition_id, artwork_id, added_at
            "#,
        )
        .bind(exhibition_id)
        .bind(artwork_id)
        .fetch_optional(executor)
        .await
    }

    pub async fn count_for(pool: &PgPool, exhibition_id: Uuid) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM exhibition_artworks WHERE exhibition_id = $1")
            .bind(exhibition_id)
            .fetch_one(pool)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_exhibition_accepts_single_day() {
        let data = NewExhibition {
            title: "Spring".to_string(),
            start_date: date(2024, 3, 1),
            end_date: date(2024, 3, 1),
        };
        assert!(data.validate().is_ok());
    }

    #[test]
    fn test_new_exhibition_rejects_reversed_dates() {
        let data = NewExhibition {
            title: "Spring".to_string(),
            start_date: date(2024, 3, 10),
            end_date: date(2024, 3, 1),
        };
        let errors = data.validate().unwrap_err();
        assert!(errors.errors().contains_key("__all__"));
    }

    #[test]
    fn test_new_exhibition_requires_title() {
        let data = NewExhibition {
            title: String::new(),
            start_date: date(2024, 3, 1),
            end_date: date(2024, 3, 31),
        };
        assert!(data.validate().unwrap_err().field_errors().contains_key("title"));
    }

    #[test]
    fn test_exhibition_display() {
        let exhibition = Exhibition {
            id: Uuid::new_v4(),
            artist_id: Uuid::new_v4(),
            title: "Spring".to_string(),
            start_date: date(2024, 3, 1),
            end_date: date(2024, 3, 31),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(exhibition.to_string(), "Spring (2024-03-01 ~ 2024-03-31)");
    }
}
