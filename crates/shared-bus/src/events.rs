//! # Registry Events
//!
//! Log entries emitted by committed registry mutations. A failed call emits
//! nothing, so the log only ever describes committed state.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Hash, Timestamp, TokenId};

/// All events that can be published to the bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum RegistryEvent {
    /// ERC-721 style mint record. `from` is always the zero address.
    /// Clients read the new token id from this entry of a submission receipt.
    #[serde(rename_all = "camelCase")]
    Transfer {
        /// Previous holder (zero on mint).
        from: Address,
        /// New holder.
        to: Address,
        /// The minted token.
        token_id: TokenId,
    },

    /// A project record was created.
    #[serde(rename_all = "camelCase")]
    ProjectSubmitted {
        /// Assigned id.
        token_id: TokenId,
        /// Creator.
        owner: Address,
        /// Project name as submitted.
        name: String,
        /// Tags as submitted (domain marker included).
        tags: Vec<String>,
        /// Commit time.
        timestamp: Timestamp,
    },

    /// A distinct voter upvoted a project.
    #[serde(rename_all = "camelCase")]
    ProjectUpvoted {
        /// Voted project.
        token_id: TokenId,
        /// Voter.
        voter: Address,
        /// Tally after this vote.
        vote_count: u64,
    },

    /// The owner attached a file content hash.
    #[serde(rename_all = "camelCase")]
    FileHashStored {
        /// Project.
        token_id: TokenId,
        /// Owner who attached the hash.
        owner: Address,
        /// Keccak-256 of the file bytes.
        file_hash: Hash,
    },

    /// The admin changed an issuer's verified flag.
    #[serde(rename_all = "camelCase")]
    VerifiedIssuerUpdated {
        /// Affected issuer.
        issuer: Address,
        /// New flag value.
        verified: bool,
    },
}

impl RegistryEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::Transfer { .. } => EventTopic::Ownership,
            Self::ProjectSubmitted { .. } => EventTopic::Submissions,
            Self::ProjectUpvoted { .. } => EventTopic::Votes,
            Self::FileHashStored { .. } => EventTopic::Attestations,
            Self::VerifiedIssuerUpdated { .. } => EventTopic::Issuers,
        }
    }

    /// The project this event refers to, if any.
    #[must_use]
    pub fn token_id(&self) -> Option<TokenId> {
        match self {
            Self::Transfer { token_id, .. }
            | Self::ProjectSubmitted { token_id, .. }
            | Self::ProjectUpvoted { token_id, .. }
            | Self::FileHashStored { token_id, .. } => Some(*token_id),
            Self::VerifiedIssuerUpdated { .. } => None,
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Mint/transfer records.
    Ownership,
    /// Project creation.
    Submissions,
    /// Upvotes.
    Votes,
    /// File-hash attestations.
    Attestations,
    /// Issuer registry changes.
    Issuers,
    /// All events (no filtering).
    All,
}

impl EventTopic {
    /// Every concrete topic an event can carry.
    pub const EVERY: [EventTopic; 5] = [
        EventTopic::Ownership,
        EventTopic::Submissions,
        EventTopic::Votes,
        EventTopic::Attestations,
        EventTopic::Issuers,
    ];
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Restrict to events about one project. `None` means any.
    pub token_id: Option<TokenId>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            token_id: None,
        }
    }

    /// Create a filter for events about a single project.
    #[must_use]
    pub fn for_token(token_id: TokenId) -> Self {
        Self {
            topics: Vec::new(),
            token_id: Some(token_id),
        }
    }

    /// Whether events of `topic` can pass (ignoring the token restriction).
    #[must_use]
    pub fn admits_topic(&self, topic: EventTopic) -> bool {
        self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&topic)
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &RegistryEvent) -> bool {
        let topic_match = self.admits_topic(event.topic());

        let token_match = match self.token_id {
            None => true,
            Some(id) => event.token_id() == Some(id),
        };

        topic_match && token_match
    }
}
