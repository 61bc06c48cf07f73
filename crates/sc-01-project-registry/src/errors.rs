//! # Error Types
//!
//! All error types for registry operations. Every rejection is raised before
//! any state is touched, so a failed call never leaves partial effects.

use crate::config::Feature;
use shared_types::{Address, TokenId};
use thiserror::Error;

// =============================================================================
// REGISTRY ERRORS
// =============================================================================

/// Errors returned by registry operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Token id is 0 or greater than the number of created projects.
    #[error("token {token_id} out of range: {total} projects exist")]
    OutOfRange { token_id: TokenId, total: u64 },

    /// The caller already voted on this project.
    #[error("{voter:?} already voted on token {token_id}")]
    AlreadyVoted { token_id: TokenId, voter: Address },

    /// The caller does not own the project.
    #[error("{caller:?} is not the owner of token {token_id} (owner {owner:?})")]
    NotOwner {
        token_id: TokenId,
        caller: Address,
        owner: Address,
    },

    /// The caller is not the registry admin.
    #[error("{caller:?} is not the registry admin")]
    NotAdmin { caller: Address },

    /// A file hash is already attached and the policy is write-once.
    #[error("file hash already set for token {token_id}")]
    AlreadySet { token_id: TokenId },

    /// The operation belongs to a feature this deployment does not enable.
    #[error("feature disabled: {0}")]
    FeatureDisabled(Feature),
}

impl RegistryError {
    /// Stable taxonomy name, used on the wire.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::OutOfRange { .. } => "OutOfRange",
            Self::AlreadyVoted { .. } => "AlreadyVoted",
            Self::NotOwner { .. } => "NotOwner",
            Self::NotAdmin { .. } => "NotAdmin",
            Self::AlreadySet { .. } => "AlreadySet",
            Self::FeatureDisabled(_) => "FeatureDisabled",
        }
    }

    /// Returns true for authorization failures (wrong caller).
    #[must_use]
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotOwner { .. } | Self::NotAdmin { .. })
    }
}

// =============================================================================
// TESTS
// =============================================================================
