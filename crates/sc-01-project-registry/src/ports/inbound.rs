//! # Driving Ports (API - Inbound)
//!
//! The interfaces the registry exposes to clients: the contract ABI, the
//! certifier facade and a single transactional entry point returning
//! receipts.

use crate::domain::entities::{CertifiedProject, NewProject, ProjectSummary};
use crate::errors::RegistryError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared_bus::RegistryEvent;
use shared_types::{Address, Hash, TokenId};

// =============================================================================
// CALLS & RECEIPTS
// =============================================================================

/// A state-mutating call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", content = "params", rename_all = "camelCase")]
pub enum RegistryCall {
    /// `submitProject(name, githubLink, tags)`.
    SubmitProject(NewProject),
    /// `upvoteProject(id)`.
    UpvoteProject {
        /// Project to vote on.
        token_id: TokenId,
    },
    /// `storeFileHash(id, hash)`.
    StoreFileHash {
        /// Project to attest.
        token_id: TokenId,
        /// Keccak-256 of the file.
        file_hash: Hash,
    },
    /// `setVerifiedIssuer(address, bool)`.
    SetVerifiedIssuer {
        /// Affected issuer.
        issuer: Address,
        /// New flag.
        verified: bool,
    },
}

impl RegistryCall {
    /// ABI method name.
    #[must_use]
    pub fn method(&self) -> &'static str {
        match self {
            Self::SubmitProject(_) => "submitProject",
            Self::UpvoteProject { .. } => "upvoteProject",
            Self::StoreFileHash { .. } => "storeFileHash",
            Self::SetVerifiedIssuer { .. } => "setVerifiedIssuer",
        }
    }
}

/// Typed return value of a committed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum CallOutput {
    /// New project id.
    TokenId(TokenId),
    /// Tally after an upvote.
    VoteCount(u64),
    /// No return value.
    Unit,
}

/// Proof that a call committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// Gap-free position in the mutation log.
    pub sequence: u64,
    /// Transaction sender.
    pub caller: Address,
    /// Typed result.
    pub output: CallOutput,
    /// Emitted events in order.
    pub logs: Vec<RegistryEvent>,
}

impl Receipt {
    /// Token id minted by this transaction, read from its `Transfer` log.
    #[must_use]
    pub fn minted_token_id(&self) -> Option<TokenId> {
        self.logs.iter().find_map(|log| match log {
            RegistryEvent::Transfer { from, token_id, .. } if from.is_zero() => Some(*token_id),
            _ => None,
        })
    }
}

// =============================================================================
// REGISTRY API
// =============================================================================

/// Contract ABI of the project registry.
///
/// Mutations take the trusted `caller` explicitly; reads are free of
/// identity.
#[async_trait]
pub trait ProjectRegistryApi: Send + Sync {
    /// Create a project owned by `caller`. Never fails.
    async fn submit_project(
        &self,
        caller: Address,
        project: NewProject,
    ) -> Result<TokenId, RegistryError>;

    /// Number of projects created so far.
    async fn get_total_projects(&self) -> u64;

    /// `(name, githubLink, owner, timestamp, tags)` of a project.
    async fn get_project(&self, token_id: TokenId) -> Result<ProjectSummary, RegistryError>;

    /// Ids owned by `owner` in creation order.
    async fn get_projects_of(&self, owner: Address) -> Vec<TokenId>;

    /// One vote per address per project.
    async fn upvote_project(&self, caller: Address, token_id: TokenId)
        -> Result<(), RegistryError>;

    /// Current tally.
    async fn get_vote_count(&self, token_id: TokenId) -> Result<u64, RegistryError>;

    /// Attach a file hash (owner only).
    async fn store_file_hash(
        &self,
        caller: Address,
        token_id: TokenId,
        file_hash: Hash,
    ) -> Result<(), RegistryError>;

    /// Stored hash or the zero sentinel.
    async fn get_file_hash(&self, token_id: TokenId) -> Result<Hash, RegistryError>;

    /// Set an issuer's verified flag (admin only).
    async fn set_verified_issuer(
        &self,
        caller: Address,
        issuer: Address,
        verified: bool,
    ) -> Result<(), RegistryError>;

    /// Whether an address is a verified issuer.
    async fn is_verified_issuer(&self, issuer: Address) -> bool;

    /// Deploying address.
    fn admin(&self) -> Address;
}

/// SkillCertifier facade over the same registry.
#[async_trait]
pub trait SkillCertifierApi: Send + Sync {
    /// Record a `(title, description, skills)` project.
    async fn add_project(
        &self,
        caller: Address,
        title: String,
        description: String,
        skills: Vec<String>,
    ) -> Result<TokenId, RegistryError>;

    /// Full records owned by `owner`, in creation order.
    async fn get_projects(&self, owner: Address) -> Vec<CertifiedProject>;
}

/// Single transactional entry point.
#[async_trait]
pub trait TransactionExecutor: Send + Sync {
    /// Apply `call` on behalf of `caller` atomically.
    async fn execute(&self, caller: Address, call: RegistryCall)
        -> Result<Receipt, RegistryError>;
}
