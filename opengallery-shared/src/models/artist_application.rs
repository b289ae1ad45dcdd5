//! Artist applications and the approval workflow
//!
//! A user asks to become an artist by submitting an application. Staff
//! process applications in bulk:
//!
//! ```text
//!            approve (creates Artist)
//! pending ─────────────────────────────▶ approved
//!    │
//!    └──────────────────────────────────▶ rejected
//!            reject
//! ```
//!
//! Both outcomes are terminal and stamp `processed_at`.
//!
//! # Schema
//!
//! ```sql
//! CREATE TYPE application_status AS ENUM ('pending', 'approved', 'rejected');
//!
//! CREATE TABLE artist_applications (
//!     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
//!     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
//!     name, gender, birthday, email, phone_number   -- as on artists
//!     status application_status NOT NULL DEFAULT 'pending',
//!     applied_at TIMESTAMPTZ NOT NULL DEFAULT clock_timestamp(),
//!     processed_at TIMESTAMPTZ,
//!     CHECK ((status = 'pending') = (processed_at IS NULL))
//! );
//!
//! CREATE UNIQUE INDEX idx_artist_applications_one_pending
//!     ON artist_applications (user_id) WHERE status = 'pending';
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};
use uuid::Uuid;

use super::artist::{Artist, ArtistProfile, Gender};
use super::user::User;
use crate::pagination::{like_pattern, search_term};

/// Partial unique index allowing one pending application per user
pub const ONE_PENDING_INDEX: &str = "idx_artist_applications_one_pending";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "application_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    /// Waiting for staff review
    Pending,

    /// Accepted; an artist profile exists for the user
    Approved,

    /// Declined
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "Pending",
            ApplicationStatus::Approved => "Approved",
            ApplicationStatus::Rejected => "Rejected",
        }
    }

    /// Approved and rejected applications never change again.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ApplicationStatus::Pending)
    }

    /// Whether `self -> next` is a legal transition
    pub fn can_transition_to(&self, next: ApplicationStatus) -> bool {
        matches!(
            (self, next),
            (ApplicationStatus::Pending, ApplicationStatus::Approved)
                | (ApplicationStatus::Pending, ApplicationStatus::Rejected)
        )
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Staff decision applied to a batch of applications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationAction {
    Approve,
    Reject,
}

impl ApplicationAction {
    pub fn target_status(&self) -> ApplicationStatus {
        match self {
            ApplicationAction::Approve => ApplicationStatus::Approved,
            ApplicationAction::Reject => ApplicationStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action: {0}")]
pub struct ParseActionError(pub String);

impl FromStr for ApplicationAction {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approve" => Ok(ApplicationAction::Approve),
            "reject" => Ok(ApplicationAction::Reject),
            other => Err(ParseActionError(other.to_string())),
        }
    }
}

/// Why an application could not be submitted
#[derive(Debug, thiserror::Error)]
pub enum ApplicationError {
    /// Staff accounts cannot become artists
    #[error("staff accounts cannot apply to become artists")]
    StaffNotAllowed,

    /// The user already has an artist profile
    #[error("user is already registered as an artist")]
    AlreadyArtist,

    /// The user already has an application waiting for review
    #[error("user already has a pending application")]
    AlreadyPending,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// A request to become an artist
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ArtistApplication {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub gender: Gender,
    pub birthday: NaiveDate,
    pub email: String,
    pub phone_number: String,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,

    /// Set when the application leaves `pending`
    pub processed_at: Option<DateTime<Utc>>,
}

const APPLICATION_COLUMNS: &str = "id, user_id, name, gender, birthday, email, phone_number, \
     status, applied_at, processed_at";

impl ArtistApplication {
    /// Checks the submission guard for `user` without writing anything.
    ///
    /// # Errors
    ///
    /// - [`ApplicationError::StaffNotAllowed`] for staff accounts
    /// - [`ApplicationError::AlreadyArtist`] if the user has a profile
    /// - [`ApplicationError::AlreadyPending`] if an application is open
    pub async fn check_eligibility(pool: &PgPool, user: &User) -> Result<(), ApplicationError> {
        if user.is_staff {
            return Err(ApplicationError::StaffNotAllowed);
        }

        if Artist::find_by_user(pool, user.id).await?.is_some() {
            return Err(ApplicationError::AlreadyArtist);
        }

        if Self::find_pending_by_user(pool, user.id).await?.is_some() {
            return Err(ApplicationError::AlreadyPending);
        }

        Ok(())
    }

    /// Submits a new pending application after checking eligibility.
    ///
    /// A concurrent second submission loses on the one-pending index and is
    /// reported as [`ApplicationError::AlreadyPending`].
    pub async fn submit(
        pool: &PgPool,
        user: &User,
        profile: &ArtistProfile,
    ) -> Result<Self, ApplicationError> {
        Self::check_eligibility(pool, user).await?;

        let result = sqlx::query_as::<_, ArtistApplication>(&format!(
            r#"
            INSERT INTO artist_applications (user_id, name, gender, birthday, email, phone_number)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {APPLICATION_COLUMNS}
            "#
        ))
        .bind(user.id)
        .bind(&profile.name)
        .bind(profile.gender)
        .bind(profile.birthday)
        .bind(&profile.email)
        .bind(&profile.phone_number)
        .fetch_one(pool)
        .await;

        match result {
            Ok(application) => {
                info!(
                    application_id = %application.id,
                    user_id = %user.id,
                    "Artist application submitted"
                );
                Ok(application)
            }
            Err(sqlx::Error::Database(db_err))
                if db_err.constraint() == Some(ONE_PENDING_INDEX) =>
            {
                Err(ApplicationError::AlreadyPending)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, ArtistApplication>(&format!(
            "SELECT {APPLICATION_COLUMNS} FROM artist_applications WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_pending_by_user(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, ArtistApplication>(&format!(
            r#"
            SELECT {APPLICATION_COLUMNS} FROM artist_applications
            WHERE user_id = $1 AND status = 'pending'
            "#
        ))
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    /// All applications, newest first, optionally filtered by a
    /// case-insensitive substring of name, email or phone number.
    pub async fn list(pool: &PgPool, search: Option<&str>) -> Result<Vec<Self>, sqlx::Error> {
        let pattern = search_term(search).map(like_pattern);

        sqlx::query_as::<_, ArtistApplication>(&format!(
            r#"
            SELECT {APPLICATION_COLUMNS} FROM artist_applications
            WHERE $1::text IS NULL
               OR name ILIKE $1 OR email ILIKE $1 OR phone_number ILIKE $1
            ORDER BY applied_at DESC, id DESC
            "#
        ))
        .bind(&pattern)
        .fetch_all(pool)
        .await
    }

    /// Applications in `status`, newest first
    pub async fn list_by_status(
        pool: &PgPool,
        status: ApplicationStatus,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, ArtistApplication>(&format!(
            r#"
            SELECT {APPLICATION_COLUMNS} FROM artist_applications
            WHERE status = $1
            ORDER BY applied_at DESC, id DESC
            "#
        ))
        .bind(status)
        .fetch_all(pool)
        .await
    }

    pub async fn count_by_status(
        pool: &PgPool,
        status: ApplicationStatus,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM artist_applications WHERE status = $1")
            .bind(status)
            .fetch_one(pool)
            .await
    }

    /// Applies `action` to every application in `ids` that is still
    /// pending and returns how many were transitioned.
    ///
    /// Approving creates an [`Artist`] from the application's profile for
    /// the applicant. Ids that are unknown or already processed are skipped
    /// without error.
    ///
    /// The batch is all-or-nothing: it runs in one transaction with the
    /// targeted rows locked, so any failure (for example the applicant
    /// already holding a profile) rolls back every transition, and a
    /// concurrent batch naming the same rows waits and then skips them.
    pub async fn process_batch(
        pool: &PgPool,
        action: ApplicationAction,
        ids: &[Uuid],
    ) -> Result<u64, sqlx::Error> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut tx = pool.begin().await?;

        let pending = sqlx::query_as::<_, ArtistApplication>(&format!(
            r#"
            SELECT {APPLICATION_COLUMNS} FROM artist_applications
            WHERE id = ANY($1) AND status = 'pending'
            ORDER BY applied_at, id
            FOR UPDATE
            "#
        ))
        .bind(ids)
        .fetch_all(&mut *tx)
        .await?;

        debug!(
            requested = ids.len(),
            pending = pending.len(),
            ?action,
            "Processing artist applications"
        );

        let target = action.target_status();
        let mut processed = 0u64;

        for application in &pending {
            if !application.status.can_transition_to(target) {
                continue;
            }

            if action == ApplicationAction::Approve {
                let artist =
                    Artist::create(&mut *tx, application.user_id, &application.profile()).await?;
                info!(
                    application_id = %application.id,
                    artist_id = %artist.id,
                    "Artist created from application"
                );
            }

            sqlx::query(
                r#"
                UPDATE artist_applications
                SET status = $2, processed_at = NOW()
                WHERE id = $1
                "#,
            )
            .bind(application.id)
            .bind(target)
            .execute(&mut *tx)
            .await?;

            processed += 1;
        }

        tx.commit().await?;

        info!(processed, status = target.as_str(), "Artist applications processed");
        Ok(processed)
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

impl fmt::Display for ArtistApplication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.status)
    }
}
