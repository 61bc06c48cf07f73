//! # Node Configuration
//!
//! Unified configuration for the registry, the gateway and logging, read
//! from `SKILLCHAIN_*` environment variables.

use sc_01_project_registry::config::{
    parse_bool, ConfigError as RegistryConfigError, RegistryConfig,
};
use sc_03_api_gateway::domain::config::ConfigError as GatewayConfigError;
use sc_03_api_gateway::GatewayConfig;
use std::env;
use thiserror::Error;

/// Log filter variable.
pub const ENV_LOG: &str = "SKILLCHAIN_LOG";
/// Fallback log filter variable.
pub const ENV_RUST_LOG: &str = "RUST_LOG";
/// JSON log output variable.
pub const ENV_JSON_LOGS: &str = "SKILLCHAIN_JSON_LOGS";

/// Complete node configuration.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Registry deployment.
    pub registry: RegistryConfig,
    /// JSON-RPC gateway.
    pub gateway: GatewayConfig,
    /// Log output.
    pub logging: LoggingConfig,
}

impl NodeConfig {
    /// Gateway and logging defaults around a registry deployment.
    pub fn new(registry: RegistryConfig) -> Self {
        Self {
            registry,
            gateway: GatewayConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Load every section from the process environment.
    ///
    /// `SKILLCHAIN_ADMIN` is required; everything else has a default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            registry: RegistryConfig::from_env()?,
            gateway: GatewayConfig::from_env()?,
            logging: LoggingConfig::from_env()?,
        })
    }
}

/// Log output configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `EnvFilter` directive string.
    pub filter: String,
    /// One JSON object per line instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load through `lookup`. `SKILLCHAIN_LOG` wins over `RUST_LOG`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(filter) = lookup(ENV_LOG).or_else(|| lookup(ENV_RUST_LOG)) {
            if !filter.trim().is_empty() {
                config.filter = filter;
            }
        }
        if let Some(raw) = lookup(ENV_JSON_LOGS) {
            config.json = parse_bool(ENV_JSON_LOGS, &raw).map_err(ConfigError::Logging)?;
        }

        Ok(config)
    }
}

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Registry settings are invalid.
    #[error("registry configuration: {0}")]
    Registry(#[from] RegistryConfigError),

    /// Logging settings are invalid.
    #[error("logging configuration: {0}")]
    Logging(RegistryConfigError),

    /// Gateway settings are invalid.
    #[error("gateway configuration: {0}")]
    Gateway(#[from] GatewayConfigError),
}
