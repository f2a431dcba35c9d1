//! Database configuration - environment loading
//!
//! Configuration is loaded from environment variables:
//! - `APP_DB_USERNAME`: database role (required)
//! - `APP_DB_PASSWORD`: role password (required)
//! - `APP_DB_NAME`: database name (required)
//! - `APP_DB_HOST`: server host (default: localhost)
//! - `APP_DB_PORT`: server port (default: 5432)

use sqlx::postgres::{PgConnectOptions, PgSslMode};

pub const ENV_USERNAME: &str = "APP_DB_USERNAME";
pub const ENV_PASSWORD: &str = "APP_DB_PASSWORD";
pub const ENV_NAME: &str = "APP_DB_NAME";
pub const ENV_HOST: &str = "APP_DB_HOST";
pub const ENV_PORT: &str = "APP_DB_PORT";

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 5432;

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Connection settings for the products database
#[derive(Clone)]
pub struct DbConfig {
    pub username: String,
    pub password: String,
    pub database: String,
    pub host: String,
    pub port: u16,
}

impl DbConfig {
    /// Create config with the three required settings and default host/port.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            database: database.into(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }

    /// Create config from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Create config from an arbitrary variable lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.is_empty());
        let required = |var: &'static str| get(var).ok_or(ConfigError::Missing(var));

        let mut config = Self::new(
            required(ENV_USERNAME)?,
            required(ENV_PASSWORD)?,
            required(ENV_NAME)?,
        );

        if let Some(host) = get(ENV_HOST) {
            config.host = host;
        }

        if let Some(port) = get(ENV_PORT) {
            config.port = port.parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::Invalid {
                    var: ENV_PORT,
                    reason: e.to_string(),
                }
            })?;
        }

        Ok(config)
    }

    /// Connection options for sqlx. TLS is disabled.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .password(&self.password)
            .database(&self.database)
            .ssl_mode(PgSslMode::Disable)
    }
}

// Keep the password out of logs.
impl std::fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConfig")
            .field("username", &self.username)
            .field("password", &"***")
            .field("database", &self.database)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}
