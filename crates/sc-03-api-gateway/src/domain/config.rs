//! Gateway configuration with validation.

use serde::{Deserialize, Serialize};
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Bind address variable.
pub const ENV_HTTP_ADDR: &str = "SKILLCHAIN_HTTP_ADDR";
/// Batch size limit variable.
pub const ENV_MAX_BATCH: &str = "SKILLCHAIN_MAX_BATCH";
/// Request body limit variable.
pub const ENV_MAX_BODY_BYTES: &str = "SKILLCHAIN_MAX_BODY_BYTES";
/// Per-request timeout variable.
pub const ENV_REQUEST_TIMEOUT_MS: &str = "SKILLCHAIN_REQUEST_TIMEOUT_MS";
/// Comma-separated CORS origins variable.
pub const ENV_CORS_ORIGINS: &str = "SKILLCHAIN_CORS_ORIGINS";

/// Main gateway configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// HTTP bind address
    pub http_addr: SocketAddr,
    /// Request validation limits
    pub limits: LimitsConfig,
    /// Whole-request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// CORS configuration
    pub cors: CorsConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            http_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 8545),
            limits: LimitsConfig::default(),
            request_timeout_ms: 10_000,
            cors: CorsConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults for
    /// unset variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_HTTP_ADDR) {
            config.http_addr = parse_var(ENV_HTTP_ADDR, &raw)?;
        }
        if let Some(raw) = lookup(ENV_MAX_BATCH) {
            config.limits.max_batch_size = parse_var(ENV_MAX_BATCH, &raw)?;
        }
        if let Some(raw) = lookup(ENV_MAX_BODY_BYTES) {
            config.limits.max_request_size = parse_var(ENV_MAX_BODY_BYTES, &raw)?;
        }
        if let Some(raw) = lookup(ENV_REQUEST_TIMEOUT_MS) {
            config.request_timeout_ms = parse_var(ENV_REQUEST_TIMEOUT_MS, &raw)?;
        }
        if let Some(raw) = lookup(ENV_CORS_ORIGINS) {
            config.cors.allowed_origins = raw
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.limits.max_request_size == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_request_size cannot be 0".into(),
            ));
        }

        if self.limits.max_batch_size == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_batch_size cannot be 0".into(),
            ));
        }

        if self.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout(
                "request timeout cannot be 0".into(),
            ));
        }

        if self.cors.allowed_origins.is_empty() {
            return Err(ConfigError::Invalid("no CORS origins configured".into()));
        }

        Ok(())
    }

    /// Whole-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Request size and count limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum request body in bytes
    pub max_request_size: usize,
    /// Maximum requests in one batch
    pub max_batch_size: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_request_size: 1024 * 1024,
            max_batch_size: 100,
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origins ("*" for all)
    pub allowed_origins: Vec<String>,
    /// Max age for preflight cache, in seconds
    pub max_age: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            max_age: 86400,
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Invalid size or count limit
    #[error("invalid limit: {0}")]
    InvalidLimit(String),
    /// Invalid timeout value
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
    /// A variable holds a value that does not parse
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue {
        /// Variable name
        var: &'static str,
        /// Offending value
        value: String,
    },
    /// General configuration error
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn parse_var<T: std::str::FromStr>(var: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        var,
        value: raw.to_string(),
    })
}
