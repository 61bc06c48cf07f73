//! # Project Listings
//!
//! The client-side view of a project: the registry tuple plus its vote
//! count, with the domain marker lifted out of the tags.

use sc_01_project_registry::domain::ProjectSummary;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Domain, Timestamp, TokenId};

/// Split registry tags into the domain marker and the remaining tags.
///
/// The domain is the first tag that exactly equals a known marker
/// (`developer` when none does). Every occurrence of that marker is removed;
/// markers of other domains stay as ordinary tags.
#[must_use]
pub fn classify_tags(tags: &[String]) -> (Domain, Vec<String>) {
    let domain = tags
        .iter()
        .find_map(|tag| Domain::from_tag(tag))
        .unwrap_or_default();
    let marker = domain.as_tag();
    let remaining = tags.iter().filter(|t| t.as_str() != marker).cloned().collect();
    (domain, remaining)
}

/// A project as shown in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListing {
    /// Registry id.
    pub token_id: TokenId,
    /// Project name.
    pub name: String,
    /// Repository link; `None` when the registry holds an empty string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_link: Option<String>,
    /// Creator.
    pub owner: Address,
    /// Creation time.
    pub timestamp: Timestamp,
    /// Tags without the domain marker.
    pub tags: Vec<String>,
    /// Domain recovered from the tags.
    pub domain: Domain,
    /// Current tally.
    pub votes: u64,
}

impl ProjectListing {
    /// Build a listing from a `getProject` result and a vote count.
    #[must_use]
    pub fn from_summary(token_id: TokenId, summary: ProjectSummary, votes: u64) -> Self {
        let (domain, tags) = classify_tags(&summary.tags);
        let github_link = Some(summary.github_link).filter(|l| !l.is_empty());
        Self {
            token_id,
            name: summary.name,
            github_link,
            owner: summary.owner,
            timestamp: summary.timestamp,
            tags,
            domain,
            votes,
        }
    }

    /// Case-insensitive substring match over name, link, owner and tags.
    /// `needle` must already be lowercase.
    #[must_use]
    pub fn matches_search(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .github_link
                .as_deref()
                .is_some_and(|l| l.to_lowercase().contains(needle))
            || self.owner.to_hex().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }
}
