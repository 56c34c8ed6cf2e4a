//! Configuration - database connection and deployment settings
//!
//! Configuration is loaded from environment variables:
//! - `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD`, `DB_NAME`: connection
//! - `DB_MAX_CONNECTIONS`: pool bound (default: 10)
//! - `DB_READ_ONLY`: reject submissions when `true`
//! - `DB_STATIC_LISTING`: serve the built-in demo list while read-only
//! - `UPLOAD_DIR`: where uploaded images land (default: public/schoolImages)
//! - `MAX_UPLOAD_BYTES`: request body limit for submissions

use std::path::PathBuf;

use sqlx::postgres::PgConnectOptions;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Default request body limit for submissions (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Public URL prefix under which uploaded images are served.
pub const IMAGE_URL_PREFIX: &str = "/schoolImages";

/// Database connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Option<String>,
    pub database: String,
    pub max_connections: u32,
}

impl DbConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary key lookup (for testing)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            host: lookup("DB_HOST").unwrap_or(defaults.host),
            port: lookup("DB_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            user: lookup("DB_USER").unwrap_or(defaults.user),
            password: lookup("DB_PASSWORD").filter(|p| !p.is_empty()),
            database: lookup("DB_NAME").unwrap_or(defaults.database),
            max_connections: lookup("DB_MAX_CONNECTIONS")
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.max_connections),
        }
    }

    /// Build sqlx connect options from these settings.
    pub fn connect_options(&self) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.database);

        match &self.password {
            Some(password) => options.password(password),
            None => options,
        }
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: None,
            database: "schooldir".to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

/// Application settings that shape request handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory uploaded images are written to and served from
    pub upload_dir: PathBuf,
    /// Reject submissions with 403
    pub read_only: bool,
    /// While read-only, answer listings from the built-in demo list
    pub static_listing: bool,
    /// Request body limit for submissions
    pub max_upload_bytes: usize,
}

impl AppConfig {
    /// Create config from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary key lookup (for testing)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            upload_dir: lookup("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            read_only: lookup("DB_READ_ONLY").is_some_and(|v| is_truthy(&v)),
            static_listing: lookup("DB_STATIC_LISTING").is_some_and(|v| is_truthy(&v)),
            max_upload_bytes: lookup("MAX_UPLOAD_BYTES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_upload_bytes),
        }
    }

    /// Create config with explicit upload directory (for testing)
    pub fn with_upload_dir(upload_dir: PathBuf) -> Self {
        Self {
            upload_dir,
            ..Self::default()
        }
    }

    /// Whether listings should skip storage and use the demo list.
    pub fn serves_static_listing(&self) -> bool {
        self.read_only && self.static_listing
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("public").join("schoolImages"),
            read_only: false,
            static_listing: false,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

fn is_truthy(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}
