//! API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults, once at startup, and injected into the handler state.

use std::env;

use boleto_queue::DEFAULT_QUEUE_NAME;
use boleto_render::code128::DEFAULT_HEIGHT;

/// Default HTTP port (the form's historical endpoint).
pub const DEFAULT_HTTP_PORT: u16 = 7133;

/// Default dispatch buffer size.
pub const DEFAULT_PUBLISH_BUFFER: usize = 256;

/// API configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Queue server connection string (required)
    pub queue_connection_target: String,

    /// Destination queue name
    pub queue_name: String,

    /// HTTP bind address
    pub bind_addr: String,

    /// HTTP port
    pub http_port: u16,

    /// Messages buffered for the publish dispatcher
    pub publish_buffer: usize,

    /// Barcode image height in pixels
    pub barcode_height: u32,

    /// Origins allowed by CORS (`*` for any)
    pub cors_allowed_origins: Vec<String>,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its
    /// value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let queue_connection_target = lookup("QUEUE_CONNECTION_TARGET")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingRequired("QUEUE_CONNECTION_TARGET".to_string()))?;

        let config = ApiConfig {
            queue_connection_target,

            queue_name: lookup("QUEUE_NAME")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_QUEUE_NAME.to_string()),

            bind_addr: lookup("HTTP_BIND_ADDR").unwrap_or_else(|| "0.0.0.0".to_string()),

            http_port: parse_or(&lookup, "HTTP_PORT", DEFAULT_HTTP_PORT)?,

            publish_buffer: parse_or(&lookup, "PUBLISH_BUFFER", DEFAULT_PUBLISH_BUFFER)?,

            barcode_height: parse_or(&lookup, "BARCODE_HEIGHT", DEFAULT_HEIGHT)?,

            cors_allowed_origins: parse_origins(
                &lookup("CORS_ALLOWED_ORIGINS").unwrap_or_default(),
            ),
        };

        if config.publish_buffer == 0 {
            return Err(ConfigError::InvalidValue("PUBLISH_BUFFER".to_string()));
        }
        if config.barcode_height == 0 {
            return Err(ConfigError::InvalidValue("BARCODE_HEIGHT".to_string()));
        }

        Ok(config)
    }

    /// Returns the full bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.http_port)
    }
}

/// Parses `key` when set, otherwise returns `default`.
fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

/// Splits a comma-separated origin list; empty means any origin.
fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if origins.is_empty() {
        vec!["*".to_string()]
    } else {
        origins
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
