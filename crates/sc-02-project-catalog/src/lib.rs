//! # SC-02 Project Catalog - Client Read Model
//!
//! **Subsystem ID:** 2
//!
//! ## Purpose
//!
//! Everything a client does with registry answers before showing them:
//! recovering the domain from the tag list, listing all or one owner's
//! projects, search/filter/sort, dashboard and portfolio figures, and
//! preparing submissions (tag cleanup, domain marker, document hashing).
//!
//! ## Outbound Dependencies
//!
//! | Port | Registry calls | Purpose |
//! |------|----------------|---------|
//! | `RegistryReader` | `getTotalProjects`, `getProject`, `getProjectsOf`, `getVoteCount` | Listings |
//! | `RegistryWriter` | `submitProject`, `storeFileHash` | Submissions |
//!
//! Both ports are implemented for every `ProjectRegistryApi`.
//!
//! ## Failure Handling
//!
//! A project that fails to load is logged and left out of the listing; the
//! rest of the listing is still returned.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod service;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::domain::forms::{form_fields, validate_form, FieldKind, FormField};
    pub use crate::domain::listing::{classify_tags, ProjectListing};
    pub use crate::domain::query::{DomainFilter, ProjectQuery, SortOrder};
    pub use crate::domain::stats::{DashboardStats, PortfolioStats};
    pub use crate::domain::submission::{
        normalize_tags, PreparedSubmission, SubmissionDraft, SubmissionOutcome,
        UNTITLED_PROJECT,
    };
    pub use crate::errors::CatalogError;
    pub use crate::ports::outbound::{RegistryReader, RegistryWriter};
    pub use crate::service::ProjectCatalog;
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 2;

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Project Catalog";
