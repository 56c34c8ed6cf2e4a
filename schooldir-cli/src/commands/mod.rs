//! Command implementations for schooldir CLI

pub mod init_db;
pub mod serve;

use clap::Args;
use schooldir_server::DbConfig;

// Re-export main dispatcher functions for flat access from main.rs
pub use init_db::run_init_db;
pub use serve::run_serve;

/// Database connection flags shared by commands.
///
/// Unset flags fall back to `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD`,
/// `DB_NAME` and `DB_MAX_CONNECTIONS`.
#[derive(Args, Debug, Default)]
pub struct DbArgs {
    /// Database host
    #[arg(long)]
    pub db_host: Option<String>,

    /// Database port
    #[arg(long)]
    pub db_port: Option<u16>,

    /// Database user
    #[arg(long)]
    pub db_user: Option<String>,

    /// Database password
    #[arg(long)]
    pub db_password: Option<String>,

    /// Database name
    #[arg(long)]
    pub db_name: Option<String>,

    /// Maximum simultaneous database connections
    #[arg(long)]
    pub db_max_connections: Option<u32>,
}

impl DbArgs {
    /// Environment config with flags layered on top.
    pub fn resolve(&self) -> DbConfig {
        self.apply(DbConfig::from_env())
    }

    fn apply(&self, mut config: DbConfig) -> DbConfig {
        if let Some(host) = &self.db_host {
            config.host = host.clone();
        }
        if let Some(port) = self.db_port {
            config.port = port;
        }
        if let Some(user) = &self.db_user {
            config.user = user.clone();
        }
        if let Some(password) = &self.db_password {
            config.password = Some(password.clone());
        }
        if let Some(name) = &self.db_name {
            config.database = name.clone();
        }
        if let Some(max) = self.db_max_connections.filter(|n| *n > 0) {
            config.max_connections = max;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_replace_only_what_they_set() {
        let args = DbArgs {
            db_host: Some("db.example.net".into()),
            db_max_connections: Some(0),
            ..DbArgs::default()
        };
        let config = args.apply(DbConfig::default());

        assert_eq!(config.host, "db.example.net");
        assert_eq!(config.port, 5432);
        assert_eq!(config.max_connections, 10);
    }
}
