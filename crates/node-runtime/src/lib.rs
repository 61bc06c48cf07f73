//! # SkillChain Node Runtime
//!
//! Library side of the `skillchain-node` binary, exposed for tests.
//!
//! ## Startup Sequence
//!
//! 1. Load [`NodeConfig`] from `SKILLCHAIN_*` variables
//! 2. Install the tracing subscriber
//! 3. Subscribe the event logger, then deploy the registry
//! 4. Serve JSON-RPC until Ctrl-C
//! 5. Drain the event logger and exit
//!
//! ## Modules
//!
//! - `container/` - Configuration assembly
//! - `telemetry` - Tracing subscriber setup
//! - `wiring/` - Background tasks fed by the event bus
//! - `runtime` - Node lifecycle

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod container;
pub mod runtime;
pub mod telemetry;
pub mod wiring;

pub use container::{ConfigError, LoggingConfig, NodeConfig};
pub use runtime::{shutdown_signal, NodeError, NodeRegistry, NodeRuntime};
pub use telemetry::{init_tracing, TelemetryError};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
