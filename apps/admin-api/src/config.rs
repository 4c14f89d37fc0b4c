//! Admin API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//! Business settings such as the any-status override live in the database,
//! not here.

use serde::{Deserialize, Serialize};
use std::env;
use std::net::SocketAddr;

/// Development-only signing secret used when `JWT_SECRET` is unset.
const DEV_JWT_SECRET: &str = "statusguard-dev-secret-change-in-production";

/// Admin API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Interface to bind the HTTP server to
    pub bind_addr: String,

    /// HTTP server port
    pub http_port: u16,

    /// SQLite database file
    pub database_path: String,

    /// JWT secret key for signing admin tokens
    pub jwt_secret: String,

    /// Admin token lifetime in seconds
    pub jwt_lifetime_secs: i64,

    /// Sender address on customer notifications
    pub mail_from_address: String,

    /// Sender name on customer notifications
    pub mail_from_name: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        AdminConfig {
            bind_addr: "0.0.0.0".to_string(),
            http_port: 8080,
            database_path: "./statusguard.db".to_string(),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            jwt_lifetime_secs: 3600,
            mail_from_address: "sales@example.com".to_string(),
            mail_from_name: "Sales".to_string(),
        }
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AdminConfig::default();

        let config = AdminConfig {
            bind_addr: lookup("HTTP_BIND_ADDR").unwrap_or(defaults.bind_addr),

            http_port: match lookup("HTTP_PORT") {
                Some(raw) => raw
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("HTTP_PORT".to_string()))?,
                None => defaults.http_port,
            },

            database_path: lookup("DATABASE_PATH").unwrap_or(defaults.database_path),

            // In production, this MUST be set via environment variable
            jwt_secret: lookup("JWT_SECRET").unwrap_or(defaults.jwt_secret),

            jwt_lifetime_secs: match lookup("JWT_LIFETIME_SECS") {
                Some(raw) => raw
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("JWT_LIFETIME_SECS".to_string()))?,
                None => defaults.jwt_lifetime_secs,
            },

            mail_from_address: lookup("MAIL_FROM_ADDRESS").unwrap_or(defaults.mail_from_address),

            mail_from_name: lookup("MAIL_FROM_NAME").unwrap_or(defaults.mail_from_name),
        };

        if config.jwt_secret.trim().is_empty() {
            return Err(ConfigError::MissingRequired("JWT_SECRET".to_string()));
        }
        if config.jwt_lifetime_secs <= 0 {
            return Err(ConfigError::InvalidValue("JWT_LIFETIME_SECS".to_string()));
        }
        if !config.mail_from_address.contains('@') {
            return Err(ConfigError::InvalidValue("MAIL_FROM_ADDRESS".to_string()));
        }

        Ok(config)
    }

    /// Socket address the server listens on.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind_addr, self.http_port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue("HTTP_BIND_ADDR".to_string()))
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
