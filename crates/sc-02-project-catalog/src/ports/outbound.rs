//! # Driven Ports (SPI - Outbound)
//!
//! The registry calls the catalog depends on, split into the read side used
//! by listings and the write side used by submissions.

use async_trait::async_trait;
use sc_01_project_registry::domain::{NewProject, ProjectSummary};
use sc_01_project_registry::errors::RegistryError;
use shared_types::{Address, Hash, TokenId};

/// Registry reads.
#[async_trait]
pub trait RegistryReader: Send + Sync {
    /// `getTotalProjects`.
    async fn total_projects(&self) -> u64;

    /// `getProject`.
    async fn project(&self, token_id: TokenId) -> Result<ProjectSummary, RegistryError>;

    /// `getProjectsOf`.
    async fn projects_of(&self, owner: Address) -> Vec<TokenId>;

    /// `getVoteCount`.
    async fn vote_count(&self, token_id: TokenId) -> Result<u64, RegistryError>;
}

/// Registry writes performed by a submission.
#[async_trait]
pub trait RegistryWriter: Send + Sync {
    /// `submitProject` on behalf of `caller`.
    async fn submit(&self, caller: Address, project: NewProject)
        -> Result<TokenId, RegistryError>;

    /// `storeFileHash` on behalf of `caller`.
    async fn attach_file_hash(
        &self,
        caller: Address,
        token_id: TokenId,
        file_hash: Hash,
    ) -> Result<(), RegistryError>;
}
