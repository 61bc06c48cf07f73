//! Domain layer: configuration, errors, method registry and the JSON-RPC
//! envelope.

pub mod config;
pub mod error;
pub mod methods;
pub mod types;
