//! # Project Registry Service
//!
//! Wraps the [`RegistryLedger`] for concurrent callers and publishes the
//! events of every committed mutation to the event bus.
//!
//! ## Ordering
//!
//! - Mutations hold the ledger write guard for their whole check-then-apply
//!   step, so concurrent votes cannot both pass the membership check.
//! - Reads take the read guard and only ever see committed state.
//! - Events are published after the write guard is released but while the
//!   publish lock is still held, so bus order equals commit order.

use crate::adapters::ManualClock;
use crate::config::{ConfigError, ContractVariant, RegistryConfig};
use crate::domain::entities::{CertifiedProject, NewProject, ProjectSummary};
use crate::domain::invariants::check_all_invariants;
use crate::domain::ledger::{Committed, RegistryLedger};
use crate::errors::RegistryError;
use crate::ports::inbound::{
    CallOutput, ProjectRegistryApi, Receipt, RegistryCall, SkillCertifierApi,
    TransactionExecutor,
};
use crate::ports::outbound::BlockClock;

use async_trait::async_trait;
use serde::Serialize;
use shared_bus::{EventPublisher, InMemoryEventBus};
use shared_types::{Address, Hash, Timestamp, TokenId};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, instrument, warn};

/// Statistics for the registry service.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStats {
    /// Projects created.
    pub submissions: u64,
    /// Votes accepted.
    pub votes: u64,
    /// File hashes stored.
    pub file_hashes: u64,
    /// Issuer flag changes.
    pub issuer_updates: u64,
    /// Calls rejected with a registry error.
    pub rejected_calls: u64,
    /// Events handed to the bus.
    pub events_published: u64,
}

/// The registry service.
pub struct RegistryService<C: BlockClock, P: EventPublisher> {
    /// Deployment configuration.
    config: RegistryConfig,
    /// All registry state.
    ledger: RwLock<RegistryLedger>,
    /// Block time source.
    clock: Arc<C>,
    /// Event sink.
    publisher: Arc<P>,
    /// Held from commit through publication.
    publish_order: Mutex<()>,
    /// Service statistics.
    stats: RwLock<ServiceStats>,
}

impl<C: BlockClock, P: EventPublisher> RegistryService<C, P> {
    /// Deploy a registry and publish its deployment events.
    pub async fn deploy(
        config: RegistryConfig,
        clock: Arc<C>,
        publisher: Arc<P>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let deployed = RegistryLedger::deploy(&config);
        let deploy_events = deployed.events.len() as u64;
        for event in deployed.events {
            publisher.publish(event).await;
        }

        info!(
            admin = %config.admin,
            variant = %config.variant,
            file_hash_policy = ?config.file_hash_policy,
            "Registry deployed"
        );

        Ok(Self {
            config,
            ledger: RwLock::new(deployed.value),
            clock,
            publisher,
            publish_order: Mutex::new(()),
            stats: RwLock::new(ServiceStats {
                events_published: deploy_events,
                ..ServiceStats::default()
            }),
        })
    }

    /// Deployment configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Get current service statistics.
    pub async fn stats(&self) -> ServiceStats {
        self.stats.read().await.clone()
    }

    /// The event sink this service publishes to.
    pub fn publisher(&self) -> &Arc<P> {
        &self.publisher
    }

    /// Run a read-only closure against committed state.
    pub async fn read_ledger<R>(&self, f: impl FnOnce(&RegistryLedger) -> R) -> R {
        let ledger = self.ledger.read().await;
        f(&*ledger)
    }

    /// Apply one mutation atomically and publish what it emitted.
    async fn commit<T, F>(
        &self,
        caller: Address,
        method: &'static str,
        apply: F,
    ) -> Result<Committed<T>, RegistryError>
    where
        T: Send,
        F: FnOnce(&mut RegistryLedger, Timestamp) -> Result<Committed<T>, RegistryError> + Send,
    {
        let _order = self.publish_order.lock().await;
        let now = self.clock.now();

        let outcome = {
            let mut ledger = self.ledger.write().await;
            let previous = ledger.sequence();
            let outcome = apply(&mut *ledger, now);
            if outcome.is_ok() && self.config.verify_invariants {
                let check = check_all_invariants(&ledger, previous);
                if !check.is_ok() {
                    error!(method, violations = ?check.violations, "Ledger invariant violated");
                }
            }
            outcome
        };

        let committed = match outcome {
            Ok(committed) => committed,
            Err(e) => {
                warn!(method, caller = %caller, reason = e.kind(), "Call rejected: {}", e);
                self.stats.write().await.rejected_calls += 1;
                return Err(e);
            }
        };

        for event in &committed.events {
            self.publisher.publish(event.clone()).await;
        }
        self.stats.write().await.events_published += committed.events.len() as u64;

        Ok(committed)
    }

    #[instrument(skip(self, caller, project), fields(caller = %caller))]
    async fn submit(
        &self,
        caller: Address,
        project: NewProject,
    ) -> Result<Committed<TokenId>, RegistryError> {
        let committed = self
            .commit(caller, "submitProject", move |ledger, now| {
                Ok(ledger.submit_project(caller, now, project))
            })
            .await?;
        self.stats.write().await.submissions += 1;
        info!(
            token_id = committed.value,
            sequence = committed.sequence,
            "Project submitted"
        );
        Ok(committed)
    }

    #[instrument(skip(self, caller), fields(caller = %caller))]
    async fn upvote(
        &self,
        caller: Address,
        token_id: TokenId,
    ) -> Result<Committed<u64>, RegistryError> {
        let committed = self
            .commit(caller, "upvoteProject", move |ledger, _| {
                ledger.upvote_project(caller, token_id)
            })
            .await?;
        self.stats.write().await.votes += 1;
        info!(token_id, vote_count = committed.value, "Project upvoted");
        Ok(committed)
    }

    #[instrument(skip(self, caller), fields(caller = %caller))]
    async fn attest(
        &self,
        caller: Address,
        token_id: TokenId,
        file_hash: Hash,
    ) -> Result<Committed<()>, RegistryError> {
        let committed = self
            .commit(caller, "storeFileHash", move |ledger, _| {
                ledger.store_file_hash(caller, token_id, file_hash)
            })
            .await?;
        self.stats.write().await.file_hashes += 1;
        info!(token_id, file_hash = %file_hash, "File hash stored");
        Ok(committed)
    }

    #[instrument(skip(self, caller), fields(caller = %caller))]
    async fn set_issuer(
        &self,
        caller: Address,
        issuer: Address,
        verified: bool,
    ) -> Result<Committed<()>, RegistryError> {
        let committed = self
            .commit(caller, "setVerifiedIssuer", move |ledger, _| {
                ledger.set_verified_issuer(caller, issuer, verified)
            })
            .await?;
        self.stats.write().await.issuer_updates += 1;
        info!(issuer = %issuer, verified, "Verified issuer updated");
        Ok(committed)
    }
}

// =============================================================================
// API IMPLEMENTATIONS
// =============================================================================

#[async_trait]
impl<C: BlockClock, P: EventPublisher> ProjectRegistryApi for RegistryService<C, P> {
    async fn submit_project(
        &self,
        caller: Address,
        project: NewProject,
    ) -> Result<TokenId, RegistryError> {
        self.submit(caller, project).await.map(|c| c.value)
    }

    async fn get_total_projects(&self) -> u64 {
        self.ledger.read().await.total_projects()
    }

    async fn get_project(&self, token_id: TokenId) -> Result<ProjectSummary, RegistryError> {
        debug!(token_id, "getProject");
        self.ledger.read().await.get_project(token_id)
    }

    async fn get_projects_of(&self, owner: Address) -> Vec<TokenId> {
        self.ledger.read().await.projects_of(&owner)
    }

    async fn upvote_project(
        &self,
        caller: Address,
        token_id: TokenId,
    ) -> Result<(), RegistryError> {
        self.upvote(caller, token_id).await.map(|_| ())
    }

    async fn get_vote_count(&self, token_id: TokenId) -> Result<u64, RegistryError> {
        self.ledger.read().await.vote_count(token_id)
    }

    async fn store_file_hash(
        &self,
        caller: Address,
        token_id: TokenId,
        file_hash: Hash,
    ) -> Result<(), RegistryError> {
        self.attest(caller, token_id, file_hash).await.map(|_| ())
    }

    async fn get_file_hash(&self, token_id: TokenId) -> Result<Hash, RegistryError> {
        self.ledger.read().await.file_hash(token_id)
    }

    async fn set_verified_issuer(
        &self,
        caller: Address,
        issuer: Address,
        verified: bool,
    ) -> Result<(), RegistryError> {
        self.set_issuer(caller, issuer, verified).await.map(|_| ())
    }

    async fn is_verified_issuer(&self, issuer: Address) -> bool {
        self.ledger.read().await.is_verified_issuer(&issuer)
    }

    fn admin(&self) -> Address {
        self.config.admin
    }
}

#[async_trait]
impl<C: BlockClock, P: EventPublisher> SkillCertifierApi for RegistryService<C, P> {
    async fn add_project(
        &self,
        caller: Address,
        title: String,
        description: String,
        skills: Vec<String>,
    ) -> Result<TokenId, RegistryError> {
        let project = NewProject {
            name: title,
            github_link: description,
            tags: skills,
        };
        self.submit(caller, project).await.map(|c| c.value)
    }

    async fn get_projects(&self, owner: Address) -> Vec<CertifiedProject> {
        self.ledger.read().await.certified_projects_of(&owner)
    }
}

#[async_trait]
impl<C: BlockClock, P: EventPublisher> TransactionExecutor for RegistryService<C, P> {
    async fn execute(&self, caller: Address, call: RegistryCall) -> Result<Receipt, RegistryError> {
        let (sequence, output, logs) = match call {
            RegistryCall::SubmitProject(project) => {
                let c = self.submit(caller, project).await?;
                (c.sequence, CallOutput::TokenId(c.value), c.events)
            }
            RegistryCall::UpvoteProject { token_id } => {
                let c = self.upvote(caller, token_id).await?;
                (c.sequence, CallOutput::VoteCount(c.value), c.events)
            }
            RegistryCall::StoreFileHash {
                token_id,
                file_hash,
            } => {
                let c = self.attest(caller, token_id, file_hash).await?;
                (c.sequence, CallOutput::Unit, c.events)
            }
            RegistryCall::SetVerifiedIssuer { issuer, verified } => {
                let c = self.set_issuer(caller, issuer, verified).await?;
                (c.sequence, CallOutput::Unit, c.events)
            }
        };

        Ok(Receipt {
            sequence,
            caller,
            output,
            logs,
        })
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

/// Admin address used by [`create_test_service`].
pub const TEST_ADMIN: Address = Address::new([0xAD; 20]);

/// Block time [`create_test_service`] starts at.
pub const TEST_GENESIS_TIME: Timestamp = 1_700_000_000;

/// Create a multi-domain registry with a manual clock and an in-memory bus.
pub async fn create_test_service(
) -> Result<RegistryService<ManualClock, InMemoryEventBus>, ConfigError> {
    create_test_service_with(RegistryConfig::for_variant(
        TEST_ADMIN,
        ContractVariant::MultiDomain,
    ))
    .await
}

/// Create a test registry with a custom configuration.
pub async fn create_test_service_with(
    config: RegistryConfig,
) -> Result<RegistryService<ManualClock, InMemoryEventBus>, ConfigError> {
    RegistryService::deploy(
        config,
        Arc::new(ManualClock::new(TEST_GENESIS_TIME)),
        Arc::new(InMemoryEventBus::new()),
    )
    .await
}

// =============================================================================
// TESTS
// =============================================================================
