//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_JWT_EXPIRATION_HOURS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    MAX_JWT_EXPIRATION_HOURS, MIN_JWT_SECRET_LENGTH,
};
use crate::errors::{AppError, AppResult};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A missing `JWT_SECRET` falls back to an insecure development secret in
    /// debug builds only; release builds refuse to start without one.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                "dev-secret-key-minimum-32-chars!!".to_string()
            }
            Err(_) => {
                return Err(AppError::internal(
                    "JWT_SECRET environment variable must be set in production",
                ))
            }
        };

        Self::builder(jwt_secret)
            .database_url(
                env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            )
            .jwt_expiration_hours(
                env::var("JWT_EXPIRATION_HOURS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_JWT_EXPIRATION_HOURS),
            )
            .server_host(
                env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            )
            .server_port(
                env::var("SERVER_PORT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_SERVER_PORT),
            )
            .build()
    }

    /// Start a configuration with defaults and the given signing secret.
    pub fn builder(jwt_secret: impl Into<String>) -> ConfigBuilder {
        ConfigBuilder {
            config: Config {
                database_url: DEFAULT_DATABASE_URL.to_string(),
                jwt_secret: jwt_secret.into(),
                jwt_expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
                server_host: DEFAULT_SERVER_HOST.to_string(),
                server_port: DEFAULT_SERVER_PORT,
            },
        }
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Builder used by `from_env` and by tests that need a config without a process environment.
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.config.database_url = url.into();
        self
    }

    pub fn jwt_expiration_hours(mut self, hours: i64) -> Self {
        self.config.jwt_expiration_hours = hours;
        self
    }

    pub fn server_host(mut self, host: impl Into<String>) -> Self {
        self.config.server_host = host.into();
        self
    }

    pub fn server_port(mut self, port: u16) -> Self {
        self.config.server_port = port;
        self
    }

    /// Validate and finish the configuration.
    pub fn build(self) -> AppResult<Config> {
        if self.config.jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::internal(format!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            )));
        }
        if !(1..=MAX_JWT_EXPIRATION_HOURS).contains(&self.config.jwt_expiration_hours) {
            return Err(AppError::internal(format!(
                "JWT_EXPIRATION_HOURS must be between 1 and {}, got {}",
                MAX_JWT_EXPIRATION_HOURS, self.config.jwt_expiration_hours
            )));
        }
        Ok(self.config)
    }
}
