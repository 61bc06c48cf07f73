//! # Node Runtime
//!
//! Owns the deployed registry, the event bus and the logger task, and runs
//! the gateway over them until shutdown.
//!
//! ```text
//! NodeRuntime::new ──subscribe──→ InMemoryEventBus ←──publish── RegistryService
//!        │                               │                           ↑
//!        └── run ──spawn──→ event logger ┘                           │
//!              └──serve──→ ApiGatewayService ──Arc<dyn RegistryBackend>
//! ```

use crate::container::NodeConfig;
use crate::wiring::spawn_event_logger;
use sc_01_project_registry::adapters::SystemClock;
use sc_01_project_registry::config::ConfigError as RegistryConfigError;
use sc_01_project_registry::service::RegistryService;
use sc_03_api_gateway::{ApiGatewayService, GatewayError};
use shared_bus::{EventFilter, InMemoryEventBus, Subscription};
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinError;
use tracing::{error, info};

/// The registry as deployed by the node.
pub type NodeRegistry = RegistryService<SystemClock, InMemoryEventBus>;

/// Node lifecycle errors.
#[derive(Debug, Error)]
pub enum NodeError {
    /// The registry refused its configuration.
    #[error("registry deployment failed: {0}")]
    Deploy(#[from] RegistryConfigError),

    /// The gateway failed to start or stopped abnormally.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The event logger task panicked.
    #[error("event logger task failed: {0}")]
    Logger(#[from] JoinError),
}

/// A deployed node, ready to serve.
pub struct NodeRuntime {
    config: NodeConfig,
    bus: Arc<InMemoryEventBus>,
    registry: Arc<NodeRegistry>,
    events: Subscription,
}

impl NodeRuntime {
    /// Deploy the registry. Deployment events are captured for the logger.
    pub async fn new(config: NodeConfig) -> Result<Self, NodeError> {
        let bus = Arc::new(InMemoryEventBus::new());
        let events = bus.subscribe(EventFilter::all());

        let registry = RegistryService::deploy(
            config.registry.clone(),
            Arc::new(SystemClock),
            Arc::clone(&bus),
        )
        .await?;

        Ok(Self {
            config,
            bus,
            registry: Arc::new(registry),
            events,
        })
    }

    /// The deployed registry.
    pub fn registry(&self) -> Arc<NodeRegistry> {
        Arc::clone(&self.registry)
    }

    /// The bus the registry publishes to.
    pub fn bus(&self) -> Arc<InMemoryEventBus> {
        Arc::clone(&self.bus)
    }

    /// Node configuration.
    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// Bind the configured gateway address and run until `shutdown`.
    pub async fn run(
        self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<u64, NodeError> {
        let listener = TcpListener::bind(self.config.gateway.http_addr)
            .await
            .map_err(GatewayError::Bind)?;
        self.run_on(listener, shutdown).await
    }

    /// Run on a bound listener until `shutdown`.
    ///
    /// Returns how many registry events were logged over the node's life.
    pub async fn run_on(
        self,
        listener: TcpListener,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<u64, NodeError> {
        let (stop_tx, stop_rx) = watch::channel(false);
        let logger = spawn_event_logger(self.events, stop_rx);

        let served = match ApiGatewayService::new(self.config.gateway, self.registry) {
            Ok(gateway) => gateway.serve_on(listener, shutdown).await,
            Err(e) => Err(e),
        };

        // Logger outlives the gateway so late events are still written.
        let _ = stop_tx.send(true);
        let logged = logger.await?;
        info!(events_logged = logged, "Node stopped");

        served?;
        Ok(logged)
    }
}

/// Resolves when `signal` fires.
///
/// A signal that fails to install never resolves, so the node keeps
/// serving instead of shutting down right after startup.
pub async fn shutdown_signal<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
