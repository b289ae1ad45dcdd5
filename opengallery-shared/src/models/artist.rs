//! Artist profiles
//!
//! An artist profile is the gallery-facing identity of an approved user.
//! Profiles are normally created by approving an
//! [`ArtistApplication`](super::artist_application::ArtistApplication);
//! `Artist::create` is also used directly by bootstrap and test code.
//!
//! # Schema
//!
//! ```sql
//! CREATE TYPE gender AS ENUM ('male', 'female');
//!
//! CREATE TABLE artists (
//!     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
//!     user_id UUID NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
//!     name VARCHAR(16) NOT NULL,
//!     gender gender NOT NULL,
//!     birthday DATE NOT NULL,
//!     email VARCHAR(254) NOT NULL,
//!     phone_number VARCHAR(15) NOT NULL CHECK (phone_number ~ '^[0-9]{3}-[0-9]{4}-[0-9]{4}$'),
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT clock_timestamp(),
//!     updated_at TIMESTAMPTZ NOT NULL DEFAULT clock_timestamp()
//! );
//! ```
//!
//! The UNIQUE constraint on `user_id` is what stops two concurrent
//! approvals from producing two profiles for one user.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use crate::pagination::{like_pattern, search_term, Page, PageWindow, PAGE_SIZE};

/// Name of the unique constraint guarding one profile per user
pub const ARTIST_USER_UNIQUE_CONSTRAINT: &str = "artists_user_id_key";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "gender", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    /// Human-readable label for pages and exports
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown gender: {0}")]
pub struct ParseGenderError(pub String);

impl FromStr for Gender {
    type Err = ParseGenderError;

    /// Accepts the stored values as well as the Korean labels the
    /// original paper forms used.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "male" | "Male" | "남자" => Ok(Gender::Male),
            "female" | "Female" | "여자" => Ok(Gender::Female),
            other => Err(ParseGenderError(other.to_string())),
        }
    }
}

/// Profile fields shared by applications and approved artists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ArtistProfile {
    #[validate(length(min = 1, max = 16, message = "Name must be 1 to 16 characters."))]
    pub name: String,

    pub gender: Gender,

    pub birthday: NaiveDate,

    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,

    #[validate(custom(function = "crate::validation::validate_phone_number"))]
    pub phone_number: String,
}

/// An approved gallery artist
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Artist {
    pub id: Uuid,

    /// Owning account; at most one artist per user
    pub user_id: Uuid,

    pub name: String,
    pub gender: Gender,
    pub birthday: NaiveDate,
    pub email: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

const ARTIST_COLUMNS: &str =
    "id, user_id, name, gender, birthday, email, phone_number, created_at, updated_at";

impl Artist {
    /// Inserts a profile for `user_id`.
    ///
    /// Accepts any executor so approvals can run inside their batch
    /// transaction.
    ///
    /// # Errors
    ///
    /// Fails with a unique violation on [`ARTIST_USER_UNIQUE_CONSTRAINT`]
    /// when the user already has a profile.
    pub async fn create<'e, E>(
        executor: E,
        user_id: Uuid,
        profile: &ArtistProfile,
    ) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Artist>(&format!(
            r#"
            INSERT INTO artists (user_id, name, gender, birthday, email, phone_number)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {ARTIST_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(&profile.name)
        .bind(profile.gender)
        .bind(profile.birthday)
        .bind(&profile.email)
        .bind(&profile.phone_number)
        .fetch_one(executor)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Artist>(&format!(
            "SELECT {ARTIST_COLUMNS} FROM artists WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// The profile owned by `user_id`, if the user is an artist
    pub async fn find_by_user<'e, E>(
        executor: E,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Artist>(&format!(
            "SELECT {ARTIST_COLUMNS} FROM artists WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(executor)
        .await
    }

    /// Newest-first page of artists, optionally filtered by a
    /// case-insensitive substring of name, email or phone number.
    pub async fn list(
        pool: &PgPool,
        search: Option<&str>,
        page: Option<&str>,
    ) -> Result<Page<Self>, sqlx::Error> {
        let pattern = search_term(search).map(like_pattern);

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM artists
            WHERE $1::text IS NULL
               OR name ILIKE $1 OR email ILIKE $1 OR phone_number ILIKE $1
            "#,
        )
        .bind(&pattern)
        .fetch_one(pool)
        .await?;

        let window = PageWindow::resolve(page, total, PAGE_SIZE);

        let artists = sqlx::query_as::<_, Artist>(&format!(
            r#"
            SELECT {ARTIST_COLUMNS} FROM artists
            WHERE $1::text IS NULL
               OR name ILIKE $1 OR email ILIKE $1 OR phone_number ILIKE $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(&pattern)
        .bind(window.limit)
        .bind(window.offset)
        .fetch_all(pool)
        .await?;

        Ok(window.into_page(artists, total))
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM artists")
            .fetch_one(pool)
            .await
    }

    pub fn profile(&self) -> ArtistProfile {
        ArtistProfile {
            name: self.name.clone(),
            gender: self.gender,
            birthday: self.birthday,
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
        }
    }
}

impl fmt::Display for Artist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(phone_number: &str) -> ArtistProfile {
        ArtistProfile {
            name: "김작가".to_string(),
            gender: Gender::Male,
            birthday: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            email: "artist@example.com".to_string(),
            phone_number: phone_number.to_string(),
        }
    }

    #[test]
    fn test_gender_parsing() {
        assert_eq!("male".parse::<Gender>(), Ok(Gender::Male));
        assert_eq!("여자".parse::<Gender>(), Ok(Gender::Female));
        assert!("other".parse::<Gender>().is_err());
        assert_eq!(Gender::Female.as_str(), "female");
    }

    #[test]
    fn test_profile_validation_accepts_valid_profile() {
        assert!(profile("010-1234-5678").validate().is_ok());
    }

    #[test]
    fn test_profile_validation_rejects_bad_phone() {
        let errors = profile("010-12345-6789").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("phone_number"));
    }

    #[test]
    fn test_profile_validation_rejects_long_name_and_bad_email() {
        let mut p = profile("010-1234-5678");
        p.name = "이름이너무길어서열여섯자를넘어가는작가이름".to_string();
        p.email = "not-an-email".to_string();

        let errors = p.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
    }

    #[test]
    fn test_artist_display_is_name() {
        let artist = Artist {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "김작가".to_string(),
            gender: Gender::Male,
            birthday: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            email: "artist@example.com".to_string(),
            phone_number: "010-1234-5678".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert_eq!(artist.to_string(), "김작가");
        assert_eq!(artist.profile(), profile("010-1234-5678"));
    }
}
