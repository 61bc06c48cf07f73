//! # Domain Entities
//!
//! The project record and the value shapes handed to and returned by the
//! registry.

use crate::config::FileHashPolicy;
use crate::errors::RegistryError;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Hash, Timestamp, TokenId};
use std::collections::HashSet;

// =============================================================================
// INPUTS
// =============================================================================

/// Arguments of `submitProject`. Stored verbatim; the registry does not
/// validate names or links.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    /// Project name.
    pub name: String,
    /// Repository link, possibly empty.
    pub github_link: String,
    /// Ordered tags, domain marker included.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewProject {
    /// Convenience constructor.
    pub fn new(
        name: impl Into<String>,
        github_link: impl Into<String>,
        tags: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            github_link: github_link.into(),
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }
}

// =============================================================================
// PROJECT
// =============================================================================

/// A registered project.
///
/// Identity fields (`token_id`, `owner`, `timestamp`, `name`, `github_link`,
/// `tags`) are written once in [`Project::mint`] and never again. Only the
/// vote tally and the file hash change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    token_id: TokenId,
    name: String,
    github_link: String,
    owner: Address,
    timestamp: Timestamp,
    tags: Vec<String>,
    file_hash: Option<Hash>,
    vote_count: u64,
    voted_by: HashSet<Address>,
}

impl Project {
    pub(crate) fn mint(
        token_id: TokenId,
        owner: Address,
        timestamp: Timestamp,
        input: NewProject,
    ) -> Self {
        Self {
            token_id,
            name: input.name,
            github_link: input.github_link,
            owner,
            timestamp,
            tags: input.tags,
            file_hash: None,
            vote_count: 0,
            voted_by: HashSet::new(),
        }
    }

    /// Assigned id.
    #[must_use]
    pub fn token_id(&self) -> TokenId {
        self.token_id
    }

    /// Project name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Repository link (or the certifier description).
    #[must_use]
    pub fn github_link(&self) -> &str {
        &self.github_link
    }

    /// Creator.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Creation time.
    #[must_use]
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Tags in submission order.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Attached hash, if any.
    #[must_use]
    pub fn file_hash(&self) -> Option<Hash> {
        self.file_hash
    }

    /// Number of distinct voters.
    #[must_use]
    pub fn vote_count(&self) -> u64 {
        self.vote_count
    }

    /// Whether `voter` has already voted.
    #[must_use]
    pub fn has_voted(&self, voter: &Address) -> bool {
        self.voted_by.contains(voter)
    }

    /// Number of recorded voters (equals `vote_count` when consistent).
    #[must_use]
    pub fn voter_count(&self) -> usize {
        self.voted_by.len()
    }

    /// Record a vote. Membership check and insertion happen together.
    pub(crate) fn record_vote(&mut self, voter: Address) -> Result<u64, RegistryError> {
        if !self.voted_by.insert(voter) {
            return Err(RegistryError::AlreadyVoted {
                token_id: self.token_id,
                voter,
            });
        }
        self.vote_count += 1;
        Ok(self.vote_count)
    }

    /// Attach a file hash on behalf of `caller`.
    pub(crate) fn attach_file_hash(
        &mut self,
        caller: Address,
        hash: Hash,
        policy: FileHashPolicy,
    ) -> Result<(), RegistryError> {
        if caller != self.owner {
            return Err(RegistryError::NotOwner {
                token_id: self.token_id,
                caller,
                owner: self.owner,
            });
        }
        if self.file_hash.is_some() && policy == FileHashPolicy::WriteOnce {
            return Err(RegistryError::AlreadySet {
                token_id: self.token_id,
            });
        }
        self.file_hash = Some(hash);
        Ok(())
    }

    /// The `getProject` tuple.
    #[must_use]
    pub fn summary(&self) -> ProjectSummary {
        ProjectSummary {
            name: self.name.clone(),
            github_link: self.github_link.clone(),
            owner: self.owner,
            timestamp: self.timestamp,
            tags: self.tags.clone(),
        }
    }
}

// =============================================================================
// OUTPUTS
// =============================================================================

/// Result of `getProject`: `(name, githubLink, owner, timestamp, tags)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    /// Project name.
    pub name: String,
    /// Repository link.
    pub github_link: String,
    /// Creator.
    pub owner: Address,
    /// Creation time.
    pub timestamp: Timestamp,
    /// Tags in submission order.
    pub tags: Vec<String>,
}

/// A certifier-style record returned by `getProjects(owner)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertifiedProject {
    /// Title (stored as the project name).
    pub title: String,
    /// Description (stored in the link slot).
    pub description: String,
    /// Skills (stored as tags).
    pub skills: Vec<String>,
    /// Creation time.
    pub timestamp: Timestamp,
}

impl From<&Project> for CertifiedProject {
    fn from(project: &Project) -> Self {
        Self {
            title: project.name.clone(),
            description: project.github_link.clone(),
            skills: project.tags.clone(),
            timestamp: project.timestamp,
        }
    }
}
