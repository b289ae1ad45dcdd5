//! Shared helpers for database-backed tests
//!
//! Tests run against `DATABASE_URL`. When it is not set the helpers return
//! `None` and each test returns early, so `cargo test` stays green on
//! machines without PostgreSQL.

#![allow(dead_code)]

use chrono::NaiveDate;
use opengallery_shared::db::migrations::{ensure_database_exists, run_migrations};
use opengallery_shared::db::pool::{create_pool, DatabaseConfig};
use opengallery_shared::models::artist::{Artist, ArtistProfile, Gender};
use opengallery_shared::models::user::{CreateUser, User};
use sqlx::PgPool;
use std::env;
use uuid::Uuid;

/// Connects to the test database and brings the schema up to date.
pub async fn test_pool() -> Option<PgPool> {
    let Ok(url) = env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping database test");
        return None;
    };

    ensure_database_exists(&url)
        .await
        .expect("Failed to create test database");

    let config = DatabaseConfig {
        max_connections: 5,
        ..DatabaseConfig::new(url)
    };
    let pool = create_pool(&config).await.expect("Failed to create pool");
    run_migrations(&pool).await.expect("Migrations failed");

    Some(pool)
}

/// Short random token so concurrent tests never collide on names
pub fn unique(prefix: &str) -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("{}{}", prefix, &id[..8])
}

pub async fn create_user(pool: &PgPool, is_staff: bool) -> User {
    User::create(
        pool,
        CreateUser {
            username: unique("user_"),
            password_hash: "$argon2id$test".to_string(),
            is_staff,
        },
    )
    .await
    .expect("Failed to create user")
}

pub fn profile(name: &str) -> ArtistProfile {
    ArtistProfile {
        name: name.to_string(),
        gender: Gender::Male,
        birthday: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        email: "artist@example.com".to_string(),
        phone_number: "010-1234-5678".to_string(),
    }
}

/// A user who already owns an artist profile
pub async fn create_artist(pool: &PgPool, name: &str) -> (User, Artist) {
    let user = create_user(pool, false).await;
    let artist = Artist::create(pool, user.id, &profile(name))
        .await
        .expect("Failed to create artist");
    (user, artist)
}
