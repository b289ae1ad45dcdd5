/// Configuration management for the web server
///
/// Settings are layered with the `config` crate: built-in defaults first,
/// then `GALLERY_`-prefixed environment variables. `DATABASE_URL` is read
/// without a prefix so the same variable serves sqlx tooling.
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `GALLERY_HOST`: Host to bind to (default: 0.0.0.0)
/// - `GALLERY_PORT`: Port to bind to (default: 8000)
/// - `GALLERY_DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `GALLERY_SESSION_SECRET`: Session signing key, at least 32 characters (required)
/// - `GALLERY_SESSION_TTL_HOURS`: Session lifetime (default: 336, two weeks)
/// - `GALLERY_PRODUCTION`: Secure cookies and HSTS (default: false)
/// - `GALLERY_LOG_JSON`: JSON log lines (default: false)
/// - `GALLERY_STAFF_USERNAME` / `GALLERY_STAFF_PASSWORD`: staff account
///   created at startup when missing (optional, both or neither)
///
/// # Example
///
/// ```no_run
/// use opengallery_web::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use config::{Environment, Map};
use opengallery_shared::auth::session::MIN_SECRET_LENGTH;
use serde::{Deserialize, Serialize};
use std::env;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,

    /// Staff account ensured at startup
    pub bootstrap_staff: Option<StaffAccount>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    /// Behind HTTPS: mark cookies Secure and send HSTS
    pub production: bool,

    pub log_json: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// HS256 signing key for session tokens
    ///
    /// Generate with: `openssl rand -hex 32`
    pub secret: String,

    pub ttl_hours: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffAccount {
    pub username: String,

    #[serde(skip_serializing)]
    pub password: String,
}

/// Flat view of the environment as the `config` crate sees it
#[derive(Debug, Deserialize)]
struct RawSettings {
    host: String,
    port: u16,
    database_url: Option<String>,
    database_max_connections: u32,
    session_secret: Option<String>,
    session_ttl_hours: i64,
    production: bool,
    log_json: bool,
    staff_username: Option<String>,
    staff_password: Option<String>,
}

impl Config {
    /// Loads configuration from the process environment, reading `.env`
    /// first when present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(env::vars().collect())
    }

    /// Loads configuration from an explicit variable map.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `DATABASE_URL` or `GALLERY_SESSION_SECRET` is missing
    /// - the session secret is shorter than 32 characters
    /// - only one of the staff username/password pair is set
    /// - a value cannot be parsed (e.g. a non-numeric port)
    pub fn from_vars(vars: Map<String, String>) -> anyhow::Result<Self> {
        let database_url = vars.get("DATABASE_URL").cloned();

        let raw: RawSettings = config::Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8000)?
            .set_default("database_max_connections", 10)?
            .set_default("session_ttl_hours", 336)?
            .set_default("production", false)?
            .set_default("log_json", false)?
            .add_source(
                Environment::with_prefix("GALLERY")
                    .prefix_separator("_")
                    .source(Some(vars)),
            )
            .set_override_option("database_url", database_url)?
            .build()?
            .try_deserialize()?;

        let database_url = raw
            .database_url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let session_secret = raw.session_secret.ok_or_else(|| {
            anyhow::anyhow!("GALLERY_SESSION_SECRET environment variable is required")
        })?;

        if session_secret.len() < MIN_SECRET_LENGTH {
            anyhow::bail!(
                "GALLERY_SESSION_SECRET must be at least {} characters long",
                MIN_SECRET_LENGTH
            );
        }

        if raw.session_ttl_hours <= 0 {
            anyhow::bail!("GALLERY_SESSION_TTL_HOURS must be positive");
        }

        let bootstrap_staff = match (raw.staff_username, raw.staff_password) {
            (Some(username), Some(password)) => Some(StaffAccount { username, password }),
            (None, None) => None,
            _ => anyhow::bail!(
                "GALLERY_STAFF_USERNAME and GALLERY_STAFF_PASSWORD must be set together"
            ),
        };

        Ok(Self {
            server: ServerConfig {
                host: raw.host,
                port: raw.port,
                production: raw.production,
                log_json: raw.log_json,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: raw.database_max_connections,
            },
            session: SessionConfig {
                secret: session_secret,
                ttl_hours: raw.session_ttl_hours,
            },
            bootstrap_staff,
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Configuration for tests that never reach the network
    pub fn for_tests(database_url: impl Into<String>) -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                production: false,
                log_json: false,
            },
            database: DatabaseConfig {
                url: database_url.into(),
                max_connections: 5,
            },
            session: SessionConfig {
                secret: "test-session-secret-that-is-long-enough".to_string(),
                ttl_hours: 1,
            },
            bootstrap_staff: None,
        }
    }
}
