//! # Shared Types Crate
//!
//! Primitives used by the registry, the catalog, the gateway and the node.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: addresses, hashes and domain markers are
//!   defined once and carry their own wire format (`0x`-prefixed hex).
//! - **Caller identity is external**: an `Address` is whatever the signing
//!   provider says it is; nothing here verifies signatures.

pub mod domain;
pub mod entities;
pub mod errors;
pub mod hashing;

pub use domain::Domain;
pub use entities::*;
pub use errors::*;
pub use hashing::keccak256;
