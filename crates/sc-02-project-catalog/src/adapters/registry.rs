//! Adapter from the registry ABI to the catalog's ports.
//!
//! Any `ProjectRegistryApi` implementation (the in-process service, or a
//! remote client) serves as both reader and writer.

use crate::ports::outbound::{RegistryReader, RegistryWriter};
use async_trait::async_trait;
use sc_01_project_registry::domain::{NewProject, ProjectSummary};
use sc_01_project_registry::errors::RegistryError;
use sc_01_project_registry::ports::ProjectRegistryApi;
use shared_types::{Address, Hash, TokenId};

#[async_trait]
impl<T> RegistryReader for T
where
    T: ProjectRegistryApi + ?Sized,
{
    async fn total_projects(&self) -> u64 {
        self.get_total_projects().await
    }

    async fn project(&self, token_id: TokenId) -> Result<ProjectSummary, RegistryError> {
        self.get_project(token_id).await
    }

    async fn projects_of(&self, owner: Address) -> Vec<TokenId> {
        self.get_projects_of(owner).await
    }

    async fn vote_count(&self, token_id: TokenId) -> Result<u64, RegistryError> {
        self.get_vote_count(token_id).await
    }
}

#[async_trait]
impl<T> RegistryWriter for T
where
    T: ProjectRegistryApi + ?Sized,
{
    async fn submit(
        &self,
        caller: Address,
        project: NewProject,
    ) -> Result<TokenId, RegistryError> {
        self.submit_project(caller, project).await
    }

    async fn attach_file_hash(
        &self,
        caller: Address,
        token_id: TokenId,
        file_hash: Hash,
    ) -> Result<(), RegistryError> {
        self.store_file_hash(caller, token_id, file_hash).await
    }
}
