//! # Project Catalog Service
//!
//! The client read model: walks the registry, builds listings and
//! aggregates, and drives the two-step submission (create, then attest).

use crate::domain::listing::ProjectListing;
use crate::domain::query::ProjectQuery;
use crate::domain::stats::{DashboardStats, PortfolioStats};
use crate::domain::submission::{SubmissionDraft, SubmissionOutcome};
use crate::errors::CatalogError;
use crate::ports::outbound::{RegistryReader, RegistryWriter};

use shared_types::{Address, TokenId};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// The catalog over a registry.
pub struct ProjectCatalog<R: ?Sized> {
    registry: Arc<R>,
}

impl<R: ?Sized> Clone for ProjectCatalog<R> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<R: RegistryReader + ?Sized> ProjectCatalog<R> {
    /// Create a catalog over `registry`.
    pub fn new(registry: Arc<R>) -> Self {
        Self { registry }
    }

    /// The underlying registry.
    pub fn registry(&self) -> &Arc<R> {
        &self.registry
    }

    /// One project with its vote count.
    pub async fn listing(&self, token_id: TokenId) -> Result<ProjectListing, CatalogError> {
        let summary = self.registry.project(token_id).await?;
        let votes = self.registry.vote_count(token_id).await?;
        Ok(ProjectListing::from_summary(token_id, summary, votes))
    }

    /// Fetch `ids` in order, skipping any that fail.
    async fn collect(&self, ids: impl IntoIterator<Item = TokenId>) -> Vec<ProjectListing> {
        let mut out = Vec::new();
        for token_id in ids {
            match self.listing(token_id).await {
                Ok(listing) => out.push(listing),
                Err(e) => warn!(token_id, error = %e, "Skipping project that failed to load"),
            }
        }
        out
    }

    /// Every project in registry order.
    #[instrument(skip(self))]
    pub async fn explore(&self) -> Vec<ProjectListing> {
        let total = self.registry.total_projects().await;
        let listings = self.collect(1..=total).await;
        debug!(total, loaded = listings.len(), "Explore loaded");
        listings
    }

    /// Projects of `owner`, newest first.
    #[instrument(skip(self, owner), fields(owner = %owner))]
    pub async fn my_projects(&self, owner: Address) -> Vec<ProjectListing> {
        let ids = self.registry.projects_of(owner).await;
        let mut listings = self.collect(ids).await;
        listings.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        listings
    }

    /// Explore, then filter and sort.
    pub async fn search(&self, query: &ProjectQuery) -> Vec<ProjectListing> {
        query.apply(self.explore().await)
    }

    /// Dashboard figures for an optional connected wallet.
    pub async fn dashboard(&self, wallet: Option<Address>) -> DashboardStats {
        let total_projects = self.registry.total_projects().await;
        let my_projects = match wallet {
            Some(owner) => self.registry.projects_of(owner).await.len() as u64,
            None => 0,
        };
        let total_votes = self.explore().await.iter().map(|l| l.votes).sum();

        DashboardStats {
            total_projects,
            my_projects,
            total_votes,
        }
    }

    /// Portfolio figures of `owner`.
    pub async fn portfolio(&self, owner: Address) -> PortfolioStats {
        PortfolioStats::from_listings(&self.my_projects(owner).await)
    }
}

impl<R: RegistryWriter + ?Sized> ProjectCatalog<R> {
    /// Submit a draft: create the project, then store the document hash.
    ///
    /// When the hash store fails the project still exists; the error carries
    /// its id.
    #[instrument(skip(self, caller, draft), fields(caller = %caller, domain = %draft.domain))]
    pub async fn submit(
        &self,
        caller: Address,
        draft: &SubmissionDraft,
    ) -> Result<SubmissionOutcome, CatalogError> {
        let prepared = draft.prepare();
        let token_id = self.registry.submit(caller, prepared.project).await?;

        if let Some(file_hash) = prepared.file_hash {
            self.registry
                .attach_file_hash(caller, token_id, file_hash)
                .await
                .map_err(|source| CatalogError::AttestationFailed { token_id, source })?;
        }

        info!(token_id, attested = prepared.file_hash.is_some(), "Submission complete");
        Ok(SubmissionOutcome {
            token_id,
            file_hash: prepared.file_hash,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
