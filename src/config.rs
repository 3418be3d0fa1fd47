//! Server configuration loaded from the process environment.
//!
//! # Environment Variables
//!
//! - `HOST`: listen address (default `0.0.0.0`)
//! - `PORT`: listen port (default `8080`)
//! - `DATABASE_URL`: `PostgreSQL` connection URL; when unset the service runs
//!   against the static source only
//! - `DATABASE_POOL_SIZE`: maximum pooled connections (default `10`)

use std::net::SocketAddr;
use thiserror::Error;

/// Default listen host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default maximum number of pooled database connections.
pub const DEFAULT_POOL_SIZE: u32 = 10;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// `PORT` is not a valid port number.
    #[error("invalid PORT '{0}', expected an integer between 0 and 65535")]
    InvalidPort(String),

    /// `DATABASE_POOL_SIZE` is not a positive integer.
    #[error("invalid DATABASE_POOL_SIZE '{0}', expected a positive integer")]
    InvalidPoolSize(String),

    /// `HOST` and `PORT` do not form a socket address.
    #[error("invalid listen address '{0}'")]
    InvalidAddress(String),
}

/// Runtime configuration for the HTTP server and its stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    host: String,
    port: u16,
    database_url: Option<String>,
    pool_size: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            port: DEFAULT_PORT,
            database_url: None,
            pool_size: DEFAULT_POOL_SIZE,
        }
    }
}

impl ServerConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] when a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] when a variable is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigurationError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(host) = read("HOST") {
            config.host = host;
        }
        if let Some(raw) = read("PORT") {
            config.port = raw
                .parse()
                .map_err(|_| ConfigurationError::InvalidPort(raw.clone()))?;
        }
        config.database_url = read("DATABASE_URL");
        if let Some(raw) = read("DATABASE_POOL_SIZE") {
            config.pool_size = raw
                .parse::<u32>()
                .ok()
                .filter(|size| *size > 0)
                .ok_or(ConfigurationError::InvalidPoolSize(raw))?;
        }
        Ok(config)
    }

    /// Sets the listen host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the listen port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the `PostgreSQL` connection URL.
    #[must_use]
    pub fn with_database_url(mut self, database_url: impl Into<String>) -> Self {
        self.database_url = Some(database_url.into());
        self
    }

    /// Returns the configured `PostgreSQL` URL, if any.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    /// Returns the maximum number of pooled database connections.
    #[must_use]
    pub const fn pool_size(&self) -> u32 {
        self.pool_size
    }

    /// Resolves the listen socket address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidAddress`] when the host is not an
    /// IP address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigurationError> {
        let address = format!("{}:{}", self.host, self.port);
        address
            .parse()
            .map_err(|_| ConfigurationError::InvalidAddress(address))
    }
}
