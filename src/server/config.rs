//! Environment configuration.

use std::net::SocketAddr;

use crate::server::error::config::ConfigError;

/// Process configuration read once at startup
#[derive(Clone, Debug)]
pub struct Config {
    /// Postgres connection URL
    pub database_url: String,
    /// Valkey/Redis URL backing the session store
    pub valkey_url: String,
    /// Address the HTTP server binds to
    pub bind_addr: SocketAddr,
    /// Mark session cookies `Secure`, defaults to true in release builds
    pub secure_cookies: bool,
}

impl Config {
    const DEFAULT_BIND_ADDR: &'static str = "0.0.0.0:8080";

    /// Reads configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &str| lookup(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()));

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| Self::DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvValue {
                var: "BIND_ADDR".to_string(),
                reason: e.to_string(),
            })?;

        let secure_cookies = match lookup("SESSION_SECURE_COOKIES") {
            Some(value) => value
                .parse::<bool>()
                .map_err(|e| ConfigError::InvalidEnvValue {
                    var: "SESSION_SECURE_COOKIES".to_string(),
                    reason: e.to_string(),
                })?,
            // Plain HTTP during local development
            None => !cfg!(debug_assertions),
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            valkey_url: required("VALKEY_URL")?,
            bind_addr,
            secure_cookies,
        })
    }
}
