//! Staff reports
//!
//! Read-only aggregates for the admin pages. Nothing here writes.

use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use super::artist::Artist;
use super::artist_application::{ApplicationStatus, ArtistApplication};
use super::artwork::Artwork;
use crate::validation::{format_thousands, SMALL_ARTWORK_MAX_SIZE};

/// Headline numbers for the admin dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GalleryOverview {
    pub total_artists: i64,
    pub total_artworks: i64,
    pub pending_applications: i64,
}

impl GalleryOverview {
    pub async fn load(pool: &PgPool) -> Result<Self, sqlx::Error> {
        Ok(Self {
            total_artists: Artist::count(pool).await?,
            total_artworks: Artwork::count(pool).await?,
            pending_applications: ArtistApplication::count_by_status(
                pool,
                ApplicationStatus::Pending,
            )
            .await?,
        })
    }
}

/// Per-artist artwork statistics
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ArtistStatistics {
    pub artist_id: Uuid,
    pub name: String,

    /// All artworks by the artist
    pub artwork_count: i64,

    /// Artworks with size number at most [`SMALL_ARTWORK_MAX_SIZE`]
    pub small_artwork_count: i64,

    /// Mean price, `None` when the artist has no artworks
    pub avg_price: Option<f64>,
}

impl ArtistStatistics {
    /// One row per artist, including artists without artworks, ordered by
    /// name.
    pub async fn load(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, ArtistStatistics>(
            r#"
            SELECT ar.id AS artist_id,
                   ar.name,
                   COUNT(aw.id) AS artwork_count,
                   COUNT(aw.id) FILTER (WHERE aw.size_number <= $1) AS small_artwork_count,
                   AVG(aw.price)::float8 AS avg_price
            FROM artists ar
            LEFT JOIN artworks aw ON aw.artist_id = ar.id
            GROUP BY ar.id, ar.name
            ORDER BY ar.name, ar.id
            "#,
        )
        .bind(SMALL_ARTWORK_MAX_SIZE)
        .fetch_all(pool)
        .await
    }

    /// Average price rounded to a whole unit and grouped, or "-" when there
    /// is nothing to average.
    pub fn formatted_avg_price(&self) -> String {
        match self.avg_price {
            Some(avg) => format_thousands(avg.round() as i64),
            None => "-".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(avg_price: Option<f64>) -> ArtistStatistics {
        ArtistStatistics {
            artist_id: Uuid::new_v4(),
            name: "김작가".to_string(),
            artwork_count: 2,
            small_artwork_count: 1,
            avg_price,
        }
    }

    #[test]
    fn test_formatted_avg_price() {
        assert_eq!(stats(Some(1_500_000.4)).formatted_avg_price(), "1,500,000");
        assert_eq!(stats(Some(2_499.5)).formatted_avg_price(), "2,500");
        assert_eq!(stats(None).formatted_avg_price(), "-");
    }
}
