//! # OpenGallery Web Server
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/opengallery \
//! GALLERY_SESSION_SECRET=$(openssl rand -hex 32) \
//! cargo run -p opengallery-web
//! ```

use opengallery_shared::db::{
    migrations::run_migrations,
    pool::{close_pool, create_pool, DatabaseConfig},
};
use opengallery_web::{
    app::{build_router, AppState},
    bootstrap::ensure_staff_account,
    config::Config,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            "opengallery_web=debug,opengallery_shared=debug,tower_http=debug".into()
        });

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(config.server.log_json);

    tracing::info!(
        "OpenGallery web server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let mut db_config = DatabaseConfig::new(config.database.url.clone());
    db_config.max_connections = config.database.max_connections;
    let pool = create_pool(&db_config).await?;

    run_migrations(&pool).await?;

    if let Some(account) = &config.bootstrap_staff {
        ensure_staff_account(&pool, account).await?;
    }

    let bind_address = config.bind_address();
    let app = build_router(AppState::new(pool.clone(), config));

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown signal received, exiting...");
    close_pool(pool).await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
