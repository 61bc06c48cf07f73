//! # Domain Invariants
//!
//! Structural properties the ledger must satisfy after every commit:
//!
//! - Dense ids: `projects[i].token_id == i + 1`.
//! - Vote tally: `vote_count` equals the number of distinct voters.
//! - Owner index: every project appears exactly once, under its owner, in
//!   ascending id order.
//!
//! These are checked after each mutation when `verify_invariants` is set.

use crate::domain::ledger::RegistryLedger;
use shared_types::{Address, TokenId};
use std::fmt;

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// Ids are dense and 1-based.
#[must_use]
pub fn check_dense_ids(ledger: &RegistryLedger) -> bool {
    ledger
        .projects()
        .iter()
        .enumerate()
        .all(|(i, p)| p.token_id() == i as u64 + 1)
}

/// Every tally equals the size of its voter set.
#[must_use]
pub fn check_vote_tally(ledger: &RegistryLedger) -> bool {
    ledger
        .projects()
        .iter()
        .all(|p| p.vote_count() == p.voter_count() as u64)
}

/// The owner index partitions all ids, each bucket ascending and owned by
/// its key.
#[must_use]
pub fn check_owner_index(ledger: &RegistryLedger) -> bool {
    let mut indexed = 0u64;
    for (owner, ids) in ledger.owner_index() {
        if !ids.windows(2).all(|w| w[0] < w[1]) {
            return false;
        }
        for id in ids {
            match ledger.project(*id) {
                Ok(p) if p.owner() == *owner => indexed += 1,
                _ => return false,
            }
        }
    }
    indexed == ledger.total_projects()
}

// =============================================================================
// AGGREGATE CHECK
// =============================================================================

/// A broken ledger property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Ids are not `1..=total`.
    SparseIds,
    /// A project's tally does not match its voter set.
    VoteTallyMismatch {
        /// Offending project.
        token_id: TokenId,
    },
    /// The owner index disagrees with the project records.
    OwnerIndexMismatch,
    /// The sequence counter went backwards.
    SequenceRegressed {
        /// Last observed value.
        previous: u64,
        /// Current value.
        current: u64,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SparseIds => write!(f, "project ids are not dense"),
            Self::VoteTallyMismatch { token_id } => {
                write!(f, "vote tally mismatch on token {token_id}")
            }
            Self::OwnerIndexMismatch => write!(f, "owner index out of sync"),
            Self::SequenceRegressed { previous, current } => {
                write!(f, "sequence regressed from {previous} to {current}")
            }
        }
    }
}

/// Result of running every check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvariantCheckResult {
    /// Violations found, empty when the ledger is consistent.
    pub violations: Vec<InvariantViolation>,
}

impl InvariantCheckResult {
    /// No violations.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Run all checks. `previous_sequence` is the sequence observed before the
/// commit being verified.
#[must_use]
pub fn check_all_invariants(
    ledger: &RegistryLedger,
    previous_sequence: u64,
) -> InvariantCheckResult {
    let mut violations = Vec::new();

    if !check_dense_ids(ledger) {
        violations.push(InvariantViolation::SparseIds);
    }
    violations.extend(
        ledger
            .projects()
            .iter()
            .filter(|p| p.vote_count() != p.voter_count() as u64)
            .map(|p| InvariantViolation::VoteTallyMismatch {
                token_id: p.token_id(),
            }),
    );
    if !check_owner_index(ledger) {
        violations.push(InvariantViolation::OwnerIndexMismatch);
    }
    if ledger.sequence() < previous_sequence {
        violations.push(InvariantViolation::SequenceRegressed {
            previous: previous_sequence,
            current: ledger.sequence(),
        });
    }

    InvariantCheckResult { violations }
}

/// Ids owned by `owner`, checked against the project records.
#[must_use]
pub fn owned_ids_consistent(ledger: &RegistryLedger, owner: &Address) -> bool {
    ledger
        .projects_of(owner)
        .iter()
        .all(|id| ledger.project(*id).map(|p| p.owner() == *owner).unwrap_or(false))
}

// =============================================================================
// TESTS
// =============================================================================
