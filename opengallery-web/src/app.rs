/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use opengallery_web::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = opengallery_web::app::build_router(state);
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, middleware::security::SecurityHeadersLayer, routes};
use axum::{routing::get, Router};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared application state
///
/// Cloned into every handler through the `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Signing key for session tokens
    pub fn session_secret(&self) -> &str {
        &self.config.session.secret
    }
}

/// Builds the router with every page, endpoint and middleware
///
/// ```text
/// /
/// ├── GET  /health
/// ├── GET  /static/admin.js
/// ├── /accounts/
/// │   ├── GET/POST /signup
/// │   ├── GET/POST /login
/// │   └── GET      /logout
/// ├── GET  /artists/  /artworks/  /exhibitions/     (public listings)
/// ├── GET/POST /artists/apply                       (members)
/// ├── GET  /artist/dashboard                        (artists)
/// ├── GET/POST /artwork/create  /exhibition/create  (artists)
/// └── /admin/                                       (staff)
///     ├── GET  /dashboard  /applications  /statistics
///     ├── GET  /applications/download-csv
///     └── POST /process-applications                (JSON)
/// ```
///
/// Middleware, outermost first: security headers, request tracing.
pub fn build_router(state: AppState) -> Router {
    let account_routes = Router::new()
        .route(
            "/signup",
            get(routes::accounts::signup_page).post(routes::accounts::signup),
        )
        .route(
            "/login",
            get(routes::accounts::login_page).post(routes::accounts::login),
        )
        .route("/logout", get(routes::accounts::logout));

    let gallery_routes = Router::new()
        .route("/", get(routes::gallery::home))
        .route("/artists/", get(routes::gallery::artists))
        .route("/artworks/", get(routes::gallery::artworks))
        .route("/exhibitions/", get(routes::gallery::exhibitions));

    let artist_routes = Router::new()
        .route(
            "/artists/apply",
            get(routes::artists::apply_page).post(routes::artists::apply),
        )
        .route("/artist/dashboard", get(routes::artists::dashboard))
        .route(
            "/artwork/create",
            get(routes::artists::artwork_page).post(routes::artists::create_artwork),
        )
        .route(
            "/exhibition/create",
            get(routes::artists::exhibition_page).post(routes::artists::create_exhibition),
        );

    let admin_routes = Router::new()
        .route("/dashboard", get(routes::admin::dashboard))
        .route("/applications", get(routes::admin::applications))
        .route(
            "/applications/download-csv",
            get(routes::admin::download_csv),
        )
        .route("/statistics", get(routes::admin::statistics))
        .route(
            "/process-applications",
            get(routes::admin::process_applications_invalid)
                .post(routes::admin::process_applications),
        );

    let production = state.config.server.production;

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/static/admin.js", get(routes::admin::admin_script))
        .merge(gallery_routes)
        .merge(artist_routes)
        .nest("/accounts", account_routes)
        .nest("/admin", admin_routes)
        .fallback(fallback)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SecurityHeadersLayer::new(production))
        .with_state(state)
}

async fn fallback() -> crate::error::PageError {
    crate::error::PageError::NotFound
}

#[cfg(test)]
mod tests {
    use super::*;
    use opengallery_shared::db::pool::{create_lazy_pool, DatabaseConfig};

    #[tokio::test]
    async fn test_app_state_exposes_session_secret() {
        let url = "postgresql://localhost/opengallery_unused";
        let pool = create_lazy_pool(&DatabaseConfig::new(url)).unwrap();
        let state = AppState::new(pool, Config::for_tests(url));

        assert_eq!(state.session_secret(), "test-session-secret-that-is-long-enough");
        assert!(!state.config.server.production);
    }
}
