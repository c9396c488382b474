//! Application configuration module
//!
//! Configuration is read from environment variables (after `.env` has been
//! loaded by the binary), with defaults suitable for local development.
//!
//! | Variable               | Default                 |
//! |------------------------|-------------------------|
//! | `SERVER_PORT`          | `8000`                  |
//! | `DATABASE_URL`         | unset (in-memory stores)|
//! | `FRONTEND_URL`         | `http://localhost:8000` |
//! | `REQUEST_TIMEOUT_SECS` | `30`                    |
//! | `COOKIE_SECURE`        | `false`                 |

use std::time::Duration;

use thiserror::Error;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_FRONTEND_URL: &str = "http://localhost:8000";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the HTTP server binds to
    pub port: u16,
    /// PostgreSQL connection string; `None` runs on in-memory stores
    pub database_url: Option<String>,
    /// Origin allowed by CORS (credentials included)
    pub frontend_url: String,
    /// Deadline applied to every request
    pub request_timeout: Duration,
    /// Always set the `Secure` cookie attribute, even without TLS evidence
    pub cookie_secure: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: None,
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            cookie_secure: false,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = AppConfig::builder();

        if let Some(port) = lookup("SERVER_PORT") {
            let port = port
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue { key: "SERVER_PORT", value: port })?;
            builder = builder.port(port);
        }

        if let Some(url) = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()) {
            builder = builder.database_url(url);
        }

        if let Some(url) = lookup("FRONTEND_URL") {
            builder = builder.frontend_url(url);
        }

        if let Some(secs) = lookup("REQUEST_TIMEOUT_SECS") {
            let secs = secs
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue { key: "REQUEST_TIMEOUT_SECS", value: secs })?;
            builder = builder.request_timeout(Duration::from_secs(secs));
        }

        if let Some(flag) = lookup("COOKIE_SECURE") {
            let secure = match flag.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" | "" => false,
                _ => return Err(ConfigError::InvalidValue { key: "COOKIE_SECURE", value: flag }),
            };
            builder = builder.cookie_secure(secure);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidValue {
                key: "SERVER_PORT",
                value: self.port.to_string(),
            });
        }

        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "REQUEST_TIMEOUT_SECS",
                value: "0".to_string(),
            });
        }

        let origin = self.frontend_url.trim();
        let has_scheme = origin.starts_with("http://") || origin.starts_with("https://");
        if !has_scheme || origin.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidUrl(self.frontend_url.clone()));
        }

        Ok(())
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    port: Option<u16>,
    database_url: Option<String>,
    frontend_url: Option<String>,
    request_timeout: Option<Duration>,
    cookie_secure: Option<bool>,
}

impl AppConfigBuilder {
    /// Set the listening port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the database URL
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Set the frontend origin
    pub fn frontend_url(mut self, url: impl Into<String>) -> Self {
        self.frontend_url = Some(url.into());
        self
    }

    /// Set the per-request deadline
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Force the `Secure` cookie attribute
    pub fn cookie_secure(mut self, secure: bool) -> Self {
        self.cookie_secure = Some(secure);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let config = AppConfig {
            port: self.port.unwrap_or(defaults.port),
            database_url: self.database_url,
            frontend_url: self.frontend_url.unwrap_or(defaults.frontend_url),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            cookie_secure: self.cookie_secure.unwrap_or(defaults.cookie_secure),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}
