//! # SkillChain Node
//!
//! Deploys the project registry and serves it over JSON-RPC.
//!
//! Required: `SKILLCHAIN_ADMIN`. See `NodeConfig` for the rest.

use anyhow::{Context, Result};
use node_runtime::{init_tracing, shutdown_signal, NodeConfig, NodeRuntime, VERSION};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = NodeConfig::from_env().context("failed to load configuration")?;
    init_tracing(&config.logging).context("failed to initialize tracing")?;

    info!(
        version = VERSION,
        admin = %config.registry.admin,
        variant = %config.registry.variant,
        http_addr = %config.gateway.http_addr,
        "Starting SkillChain node"
    );

    let node = NodeRuntime::new(config)
        .await
        .context("failed to deploy registry")?;

    let result = node.run(shutdown_signal(tokio::signal::ctrl_c())).await;

    match result {
        Ok(events) => {
            info!(events_logged = events, "SkillChain node shut down cleanly");
            Ok(())
        }
        Err(e) => Err(e).context("node stopped with an error"),
    }
}
