//! # API Server Configuration
//!
//! Configuration is loaded from environment variables with fallback to
//! development defaults. `.env` files are honored via dotenvy in `main`.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// HTTP listen port (`PORT`, default 5000).
    pub port: u16,

    /// Path to the SQLite database file (`VENDO_DB_PATH`,
    /// default `./data/vendo.db`).
    pub database_path: PathBuf,
}

impl ApiConfig {
    /// Loads configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?;

        let database_path = env::var("VENDO_DB_PATH")
            .unwrap_or_else(|_| "./data/vendo.db".to_string())
            .into();

        Ok(ApiConfig {
            port,
            database_path,
        })
    }

    /// The socket address to bind.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
