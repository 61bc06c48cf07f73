//! # Node Container
//!
//! Configuration and the deployed services the node wires together.

pub mod config;

pub use config::{ConfigError, LoggingConfig, NodeConfig};
