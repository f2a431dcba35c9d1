//! HTTP server command
//!
//! Connects to PostgreSQL, ensures the products table exists, and serves the
//! CRUD routes until Ctrl+C or SIGTERM.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use products_server::config::{ENV_HOST, ENV_NAME, ENV_PASSWORD, ENV_PORT, ENV_USERNAME};
use products_server::db::{create_pool_with_options, ensure_schema};
use products_server::http::{run_server, ServerConfig};
use products_server::{ConfigError, DbConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "127.0.0.1:8010")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Maximum database connections in the pool
    #[arg(long, default_value_t = 5)]
    pub max_connections: u32,

    /// Skip creating the products table at startup
    #[arg(long)]
    pub no_bootstrap: bool,

    /// Database role [env: APP_DB_USERNAME]
    #[arg(long)]
    pub db_username: Option<String>,

    /// Database password [env: APP_DB_PASSWORD]
    #[arg(long)]
    pub db_password: Option<String>,

    /// Database name [env: APP_DB_NAME]
    #[arg(long)]
    pub db_name: Option<String>,

    /// Database host [env: APP_DB_HOST, default: localhost]
    #[arg(long)]
    pub db_host: Option<String>,

    /// Database port [env: APP_DB_PORT, default: 5432]
    #[arg(long)]
    pub db_port: Option<u16>,
}

impl ServeArgs {
    /// Flag value for an `APP_DB_*` variable, if given on the command line.
    fn flag(&self, var: &str) -> Option<String> {
        match var {
            ENV_USERNAME => self.db_username.clone(),
            ENV_PASSWORD => self.db_password.clone(),
            ENV_NAME => self.db_name.clone(),
            ENV_HOST => self.db_host.clone(),
            ENV_PORT => self.db_port.map(|p| p.to_string()),
            _ => None,
        }
    }

    /// Database settings: flags first, then the environment.
    fn db_config_with<F>(&self, env: F) -> Result<DbConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        DbConfig::from_lookup(|var| self.flag(var).or_else(|| env(var)))
    }

    fn db_config(&self) -> Result<DbConfig, ConfigError> {
        self.db_config_with(|var| std::env::var(var).ok())
    }

    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind,
            cors_permissive: self.cors_permissive,
            request_timeout: Duration::from_secs(self.timeout),
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let db_config = args
        .db_config()
        .context("Database settings incomplete (use --db-* flags, APP_DB_* env, or .env)")?;
    tracing::info!(
        database = %db_config.database,
        host = %db_config.host,
        "Starting products server on {}",
        args.bind
    );

    let pool = create_pool_with_options(&db_config, args.max_connections)
        .await
        .context("Failed to create database pool")?;

    if !args.no_bootstrap {
        ensure_schema(&pool)
            .await
            .context("Failed to create products table")?;
    }

    // Blocks until shutdown
    run_server(pool, args.server_config())
        .await
        .context("Server error")?;

    Ok(())
}
