/// Database models for OpenGallery
///
/// Each model owns its SQL; handlers call these static methods with the
/// shared pool (or a transaction) and never build queries themselves.
///
/// # Models
///
/// - `user`: Gallery accounts
/// - `artist`: Approved artist profiles
/// - `artist_application`: Requests to become an artist and their review
/// - `artwork`: Works owned by an artist
/// - `exhibition`: Dated groupings of an artist's artworks
/// - `report`: Read-only aggregates for staff
///
/// # Example
///
/// ```no_run
/// use opengallery_shared::models::artist_application::{ApplicationAction, ArtistApplication};
/// # use sqlx::PgPool;
/// # use uuid::Uuid;
///
/// # async fn example(pool: PgPool, ids: Vec<Uuid>) -> Result<(), sqlx::Error> {
/// let approved = ArtistApplication::process_batch(&pool, ApplicationAction::Approve, &ids).await?;
/// println!("{approved} applications approved");
/// # Ok(())
/// # }
/// ```

pub mod artist;
pub mod artist_application;
pub mod artwork;
pub mod exhibition;
pub mod report;
pub mod user;
