//! # Listing Queries
//!
//! Search, domain filter and sort over a set of listings.

use super::listing::ProjectListing;
use serde::{Deserialize, Serialize};
use shared_types::{Domain, ParseError};
use std::fmt;
use std::str::FromStr;

/// Restrict listings to one domain, or keep all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DomainFilter {
    /// No restriction.
    #[default]
    All,
    /// Only this domain.
    Only(Domain),
}

impl DomainFilter {
    /// Whether a listing passes.
    #[must_use]
    pub fn admits(&self, domain: Domain) -> bool {
        match self {
            Self::All => true,
            Self::Only(d) => *d == domain,
        }
    }
}

impl fmt::Display for DomainFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(d) => f.write_str(d.as_tag()),
        }
    }
}

impl FromStr for DomainFilter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

impl TryFrom<String> for DomainFilter {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DomainFilter> for String {
    fn from(filter: DomainFilter) -> Self {
        filter.to_string()
    }
}

/// Listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Timestamp descending.
    #[default]
    Newest,
    /// Timestamp ascending.
    Oldest,
    /// Votes descending.
    Votes,
}

/// A search over listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectQuery {
    /// Case-insensitive substring; empty matches everything.
    pub search: String,
    /// Domain restriction.
    pub domain: DomainFilter,
    /// Result order.
    pub sort: SortOrder,
}

impl ProjectQuery {
    /// Filter and sort `listings`. The sort is stable, so ties keep the
    /// input (registry) order.
    #[must_use]
    pub fn apply(&self, listings: Vec<ProjectListing>) -> Vec<ProjectListing> {
        let needle = self.search.to_lowercase();
        let mut out: Vec<ProjectListing> = listings
            .into_iter()
            .filter(|l| self.domain.admits(l.domain) && l.matches_search(&needle))
            .collect();

        match self.sort {
            SortOrder::Newest => out.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
            SortOrder::Oldest => out.sort_by(|a, b| a.timestamp.cmp(&b.timestamp)),
            SortOrder::Votes => out.sort_by(|a, b| b.votes.cmp(&a.votes)),
        }
        out
    }
}
