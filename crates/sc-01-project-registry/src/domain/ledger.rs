//! # Registry Ledger
//!
//! The explicit store object holding every project, the owner index and the
//! issuer flags. Each mutating operation validates first and only then
//! applies, returning the events it produced alongside its value. A rejected
//! call leaves the ledger untouched and produces no events.
//!
//! The ledger is synchronous and single-threaded; the service wraps it in a
//! lock to serialize callers.

use crate::config::{Feature, FeatureSet, FileHashPolicy, RegistryConfig};
use crate::domain::entities::{CertifiedProject, NewProject, Project, ProjectSummary};
use crate::errors::RegistryError;
use shared_bus::RegistryEvent;
use shared_types::{Address, Hash, Timestamp, TokenId};
use std::collections::HashMap;

/// A committed state change: its return value, its position in the mutation
/// log and the events it emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Committed<T> {
    /// Operation result.
    pub value: T,
    /// Gap-free position in the mutation log. Deployment is 0.
    pub sequence: u64,
    /// Events in emission order.
    pub events: Vec<RegistryEvent>,
}

/// Registry state.
#[derive(Debug, Clone)]
pub struct RegistryLedger {
    admin: Address,
    features: FeatureSet,
    file_hash_policy: FileHashPolicy,
    /// `projects[i]` has token id `i + 1`.
    projects: Vec<Project>,
    /// Owner -> ids in creation order.
    owned: HashMap<Address, Vec<TokenId>>,
    verified_issuers: HashMap<Address, bool>,
    /// Number of committed mutations.
    sequence: u64,
}

impl RegistryLedger {
    /// Deploy a fresh ledger.
    ///
    /// Returns the deployment events: with the issuer registry enabled the
    /// admin is registered as a verified issuer.
    #[must_use]
    pub fn deploy(config: &RegistryConfig) -> Committed<Self> {
        let mut ledger = Self {
            admin: config.admin,
            features: config.features,
            file_hash_policy: config.file_hash_policy,
            projects: Vec::new(),
            owned: HashMap::new(),
            verified_issuers: HashMap::new(),
            sequence: 0,
        };

        let mut events = Vec::new();
        if ledger.features.issuer_registry {
            ledger.verified_issuers.insert(config.admin, true);
            events.push(RegistryEvent::VerifiedIssuerUpdated {
                issuer: config.admin,
                verified: true,
            });
        }

        Committed {
            value: ledger,
            sequence: 0,
            events,
        }
    }

    fn require(&self, feature: Feature) -> Result<(), RegistryError> {
        if self.features.contains(feature) {
            Ok(())
        } else {
            Err(RegistryError::FeatureDisabled(feature))
        }
    }

    fn index_of(&self, token_id: TokenId) -> Result<usize, RegistryError> {
        let total = self.total_projects();
        if token_id == 0 || token_id > total {
            return Err(RegistryError::OutOfRange { token_id, total });
        }
        usize::try_from(token_id - 1).map_err(|_| RegistryError::OutOfRange { token_id, total })
    }

    /// Seal an applied mutation with the next sequence number.
    fn commit<T>(&mut self, value: T, events: Vec<RegistryEvent>) -> Committed<T> {
        self.sequence += 1;
        Committed {
            value,
            sequence: self.sequence,
            events,
        }
    }

    // =========================================================================
    // MUTATIONS
    // =========================================================================

    /// `submitProject`: allocate the next id and record the project.
    pub fn submit_project(
        &mut self,
        caller: Address,
        now: Timestamp,
        input: NewProject,
    ) -> Committed<TokenId> {
        let token_id = self.total_projects() + 1;

        let submitted = RegistryEvent::ProjectSubmitted {
            token_id,
            owner: caller,
            name: input.name.clone(),
            tags: input.tags.clone(),
            timestamp: now,
        };

        self.projects.push(Project::mint(token_id, caller, now, input));
        self.owned.entry(caller).or_default().push(token_id);

        self.commit(
            token_id,
            vec![
                RegistryEvent::Transfer {
                    from: Address::ZERO,
                    to: caller,
                    token_id,
                },
                submitted,
            ],
        )
    }

    /// `upvoteProject`: one vote per address per project.
    pub fn upvote_project(
        &mut self,
        caller: Address,
        token_id: TokenId,
    ) -> Result<Committed<u64>, RegistryError> {
        self.require(Feature::Voting)?;
        let idx = self.index_of(token_id)?;
        let vote_count = self.projects[idx].record_vote(caller)?;

        Ok(self.commit(
            vote_count,
            vec![RegistryEvent::ProjectUpvoted {
                token_id,
                voter: caller,
                vote_count,
            }],
        ))
    }

    /// `storeFileHash`: owner-only, write-once unless configured otherwise.
    pub fn store_file_hash(
        &mut self,
        caller: Address,
        token_id: TokenId,
        file_hash: Hash,
    ) -> Result<Committed<()>, RegistryError> {
        self.require(Feature::FileHash)?;
        let idx = self.index_of(token_id)?;
        let policy = self.file_hash_policy;
        self.projects[idx].attach_file_hash(caller, file_hash, policy)?;

        Ok(self.commit(
            (),
            vec![RegistryEvent::FileHashStored {
                token_id,
                owner: caller,
                file_hash,
            }],
        ))
    }

    /// `setVerifiedIssuer`: admin-only.
    pub fn set_verified_issuer(
        &mut self,
        caller: Address,
        issuer: Address,
        verified: bool,
    ) -> Result<Committed<()>, RegistryError> {
        self.require(Feature::IssuerRegistry)?;
        if caller != self.admin {
            return Err(RegistryError::NotAdmin { caller });
        }
        self.verified_issuers.insert(issuer, verified);

        Ok(self.commit(
            (),
            vec![RegistryEvent::VerifiedIssuerUpdated { issuer, verified }],
        ))
    }

    // =========================================================================
    // READS
    // =========================================================================

    /// Number of created projects.
    #[must_use]
    pub fn total_projects(&self) -> u64 {
        self.projects.len() as u64
    }

    /// Full record of a project.
    pub fn project(&self, token_id: TokenId) -> Result<&Project, RegistryError> {
        let idx = self.index_of(token_id)?;
        Ok(&self.projects[idx])
    }

    /// `getProject`.
    pub fn get_project(&self, token_id: TokenId) -> Result<ProjectSummary, RegistryError> {
        self.project(token_id).map(Project::summary)
    }

    /// `getProjectsOf`: ids in creation order, empty if none.
    #[must_use]
    pub fn projects_of(&self, owner: &Address) -> Vec<TokenId> {
        self.owned.get(owner).cloned().unwrap_or_default()
    }

    /// `getProjects` (certifier facade).
    #[must_use]
    pub fn certified_projects_of(&self, owner: &Address) -> Vec<CertifiedProject> {
        self.owned
            .get(owner)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.project(*id).ok())
                    .map(CertifiedProject::from)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// `getVoteCount`.
    pub fn vote_count(&self, token_id: TokenId) -> Result<u64, RegistryError> {
        self.project(token_id).map(Project::vote_count)
    }

    /// `getFileHash`: zero sentinel when unset.
    pub fn file_hash(&self, token_id: TokenId) -> Result<Hash, RegistryError> {
        self.project(token_id)
            .map(|p| p.file_hash().unwrap_or(Hash::ZERO))
    }

    /// `isVerifiedIssuer`: false for unknown addresses.
    #[must_use]
    pub fn is_verified_issuer(&self, issuer: &Address) -> bool {
        self.verified_issuers.get(issuer).copied().unwrap_or(false)
    }

    /// Deploying address.
    #[must_use]
    pub fn admin(&self) -> Address {
        self.admin
    }

    /// Enabled features.
    #[must_use]
    pub fn features(&self) -> FeatureSet {
        self.features
    }

    /// Number of committed mutations.
    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// All projects in id order.
    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Owner index.
    #[must_use]
    pub fn owner_index(&self) -> &HashMap<Address, Vec<TokenId>> {
        &self.owned
    }
}

// =============================================================================
// TESTS
// =============================================================================
