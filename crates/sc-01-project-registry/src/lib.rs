//! # SC-01 Project Registry - Submissions, Votes and Attestations
//!
//! **Subsystem ID:** 1
//!
//! ## Purpose
//!
//! Owns every submitted project, its vote tally, its optional file-hash
//! attestation, and the verified-issuer flags. Everything else in the
//! workspace is a client that calls into this crate and renders its answers.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Dense 1-based ids in creation order | `domain/ledger.rs` - `submit_project()` |
//! | Identity fields immutable after mint | `domain/entities.rs` - private fields |
//! | One vote per address per project | `domain/entities.rs` - `record_vote()` |
//! | File hash owner-only, write-once by default | `domain/entities.rs` - `attach_file_hash()` |
//! | Owner index in creation order | `domain/invariants.rs` - `check_owner_index()` |
//!
//! ## Operations
//!
//! | ABI | Trait | Failure |
//! |-----|-------|---------|
//! | `submitProject` | `ProjectRegistryApi` | none |
//! | `getProject` | `ProjectRegistryApi` | `OutOfRange` |
//! | `upvoteProject` | `ProjectRegistryApi` | `OutOfRange`, `AlreadyVoted` |
//! | `storeFileHash` | `ProjectRegistryApi` | `OutOfRange`, `NotOwner`, `AlreadySet` |
//! | `setVerifiedIssuer` | `ProjectRegistryApi` | `NotAdmin` |
//! | `addProject` / `getProjects` | `SkillCertifierApi` | none |
//! | any mutation | `TransactionExecutor` | as above, plus `FeatureDisabled` |
//!
//! ## Variants
//!
//! | Variant | Voting | File hash | Issuer registry |
//! |---------|--------|-----------|-----------------|
//! | `SkillCertifier` | - | - | - |
//! | `SkillChain` | yes | yes | - |
//! | `MultiDomain` | yes | yes | yes |
//!
//! ## Usage Example
//!
//! ```ignore
//! use sc_01_project_registry::prelude::*;
//!
//! let registry = create_test_service().await?;
//! let id = registry
//!     .submit_project(alice, NewProject::new("Resume AI", "", ["AI", "developer"]))
//!     .await?;
//! registry.upvote_project(bob, id).await?;
//! assert_eq!(registry.get_vote_count(id).await?, 1);
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod config;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain entities
    pub use crate::domain::entities::{CertifiedProject, NewProject, Project, ProjectSummary};
    pub use crate::domain::ledger::{Committed, RegistryLedger};

    // Invariants
    pub use crate::domain::invariants::{
        check_all_invariants, InvariantCheckResult, InvariantViolation,
    };

    // Configuration
    pub use crate::config::{
        ConfigError, ContractVariant, Feature, FeatureSet, FileHashPolicy, RegistryConfig,
    };

    // Ports
    pub use crate::ports::inbound::{
        CallOutput, ProjectRegistryApi, Receipt, RegistryCall, SkillCertifierApi,
        TransactionExecutor,
    };
    pub use crate::ports::outbound::BlockClock;

    // Adapters
    pub use crate::adapters::{ManualClock, SystemClock};

    // Errors
    pub use crate::errors::RegistryError;

    // Service
    pub use crate::service::{
        create_test_service, create_test_service_with, RegistryService, ServiceStats,
        TEST_ADMIN,
    };
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 1;

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Project Registry";

// =============================================================================
// TESTS
// =============================================================================
