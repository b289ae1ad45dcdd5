//! Shared helpers for router tests
//!
//! The router is driven as a tower `Service`, no socket involved.
//! [`lazy_app`] never touches the database and serves anonymous requests
//! only. [`TestApp::new`] needs PostgreSQL at `DATABASE_URL` and returns
//! `None` when it is not set, so those tests return early.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use opengallery_shared::auth::password::hash_password;
use opengallery_shared::auth::session::{create_session_token, SessionClaims};
use opengallery_shared::db::migrations::{ensure_database_exists, run_migrations};
use opengallery_shared::db::pool::{create_lazy_pool, create_pool, DatabaseConfig};
use opengallery_shared::models::user::{CreateUser, User};
use opengallery_web::app::{build_router, AppState};
use opengallery_web::config::Config;
use sqlx::PgPool;
use std::env;
use tower::Service as _;
use uuid::Uuid;

pub const PASSWORD: &str = "gallery-pass-2024";

const UNREACHABLE_URL: &str = "postgresql://localhost:1/opengallery_unreachable";

/// Router over a pool that can never connect; queries time out after a second
pub fn lazy_app() -> Router {
    let db_config = DatabaseConfig {
        acquire_timeout_seconds: 1,
        ..DatabaseConfig::new(UNREACHABLE_URL)
    };
    let pool = create_lazy_pool(&db_config).expect("Failed to create lazy pool");
    build_router(AppState::new(pool, Config::for_tests(UNREACHABLE_URL)))
}

/// `Cookie` header value for a well-signed session accepted by [`lazy_app`]
pub fn lazy_session(user_id: Uuid) -> String {
    let claims = SessionClaims::new(user_id, chrono::Duration::hours(1));
    let config = Config::for_tests(UNREACHABLE_URL);
    let token = create_session_token(&claims, &config.session.secret)
        .expect("Failed to create session token");
    format!("opengallery_session={}", token)
}

pub struct TestApp {
    pub app: Router,
    pub db: PgPool,
    pub config: Config,
}

impl TestApp {
    pub async fn new() -> Option<Self> {
        let Ok(url) = env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set, skipping database test");
            return None;
        };

        ensure_database_exists(&url)
            .await
            .expect("Failed to create test database");

        let db_config = DatabaseConfig {
            max_connections: 5,
            ..DatabaseConfig::new(url.clone())
        };
        let db = create_pool(&db_config).await.expect("Failed to create pool");
        run_migrations(&db).await.expect("Migrations failed");

        let config = Config::for_tests(url);
        let app = build_router(AppState::new(db.clone(), config.clone()));

        Some(Self { app, db, config })
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        send(&self.app, request).await
    }

    /// User with [`PASSWORD`] as password
    pub async fn create_user(&self, is_staff: bool) -> User {
        User::create(
            &self.db,
            CreateUser {
                username: unique("user_"),
                password_hash: hash_password(PASSWORD).expect("Failed to hash password"),
                is_staff,
            },
        )
        .await
        .expect("Failed to create user")
    }

    /// `Cookie` header value for a logged-in session
    pub fn session_for(&self, user: &User) -> String {
        let claims = SessionClaims::new(user.id, chrono::Duration::hours(1));
        let token = create_session_token(&claims, &self.config.session.secret)
            .expect("Failed to create session token");
        format!("opengallery_session={}", token)
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().call(request).await.expect("Router is infallible")
}

pub fn unique(prefix: &str) -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("{}{}", prefix, &id[..8])
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_form(uri: &str, fields: &[(&str, &str)], cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let body = serde_urlencoded::to_string(fields).unwrap();
    builder.body(Body::from(body)).unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

/// `name=value` of the named cookie set by the response
pub fn set_cookie(response: &Response<Body>, name: &str) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .find(|pair| pair.starts_with(&format!("{}=", name)))
        .map(str::to_string)
}
