//! Dashboard and portfolio aggregates.

use super::listing::ProjectListing;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Figures shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Projects in the registry.
    pub total_projects: u64,
    /// Projects owned by the connected wallet (0 without one).
    pub my_projects: u64,
    /// Sum of all vote tallies.
    pub total_votes: u64,
}

/// Figures shown on an owner's portfolio page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioStats {
    /// Projects owned.
    pub projects: u64,
    /// Votes received across them.
    pub total_votes: u64,
    /// Distinct domains covered.
    pub domains: u64,
}

impl PortfolioStats {
    /// Aggregate an owner's listings.
    #[must_use]
    pub fn from_listings(listings: &[ProjectListing]) -> Self {
        let domains: HashSet<_> = listings.iter().map(|l| l.domain).collect();
        Self {
            projects: listings.len() as u64,
            total_votes: listings.iter().map(|l| l.votes).sum(),
            domains: domains.len() as u64,
        }
    }
}
