//! # Domains
//!
//! Use-case categories a project can belong to. The registry itself does not
//! know about domains: clients encode the domain as a conventional marker tag
//! (the lowercase name) appended to the project's tag list, and recover it on
//! read by membership test against this fixed set.

use crate::errors::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A fixed use-case category.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// Diplomas, transcripts, academic credentials.
    University,
    /// Contracts, licences, court documents.
    Legal,
    /// Artwork authentication and ownership.
    Artist,
    /// Papers and intellectual property.
    Research,
    /// Game assets and achievements.
    Gaming,
    /// Software projects. Fallback when no marker tag is present.
    #[default]
    Developer,
}

impl Domain {
    /// Every known domain, in display order.
    pub const ALL: [Domain; 6] = [
        Domain::University,
        Domain::Legal,
        Domain::Artist,
        Domain::Research,
        Domain::Gaming,
        Domain::Developer,
    ];

    /// The marker tag stored on-chain for this domain.
    #[must_use]
    pub const fn as_tag(&self) -> &'static str {
        match self {
            Domain::University => "university",
            Domain::Legal => "legal",
            Domain::Artist => "artist",
            Domain::Research => "research",
            Domain::Gaming => "gaming",
            Domain::Developer => "developer",
        }
    }

    /// Exact (case-sensitive) match of a tag against the marker set.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Domain> {
        Self::ALL.into_iter().find(|d| d.as_tag() == tag)
    }

    /// Human-readable label.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Domain::University => "Universities",
            Domain::Legal => "Legal Professionals",
            Domain::Artist => "Artists & Creators",
            Domain::Research => "Researchers",
            Domain::Gaming => "Gaming Companies",
            Domain::Developer => "Developers",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl FromStr for Domain {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Domain::from_tag(s).ok_or_else(|| ParseError::UnknownDomain(s.to_string()))
    }
}
