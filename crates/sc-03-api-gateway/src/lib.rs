//! SC-03 API Gateway - JSON-RPC 2.0 interface to the project registry.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    API GATEWAY (sc-03)                   │
//! ├──────────────────────────────────────────────────────────┤
//! │   POST /  (single + batch)          GET /health          │
//! │        │                                                 │
//! │  ┌─────┴────────────────────────────────────────┐        │
//! │  │ Trace → CORS → Timeout → Body limit          │        │
//! │  └─────┬────────────────────────────────────────┘        │
//! │        │  x-skillchain-caller → caller identity          │
//! │  ┌─────┴──────────┐                                      │
//! │  │  route_method  │── registry ABI / certifier / catalog │
//! │  └─────┬──────────┘                                      │
//! └────────┼─────────────────────────────────────────────────┘
//!          ▼
//!   sc-01 registry  ◄──  sc-02 catalog
//! ```
//!
//! # Methods
//!
//! | Method | Params | Caller |
//! |--------|--------|--------|
//! | `submitProject` | name, githubLink, tags | required |
//! | `getTotalProjects` | - | - |
//! | `getProject` | tokenId | - |
//! | `getProjectsOf` | owner | - |
//! | `upvoteProject` | tokenId | required |
//! | `getVoteCount` | tokenId | - |
//! | `storeFileHash` | tokenId, fileHash | required |
//! | `getFileHash` | tokenId | - |
//! | `setVerifiedIssuer` | issuer, verified | required |
//! | `isVerifiedIssuer` | issuer | - |
//! | `addProject` | title, description, skills | required |
//! | `getProjects` | owner | - |
//! | `catalog_explore` | query? | - |
//! | `catalog_project` | tokenId | - |
//! | `catalog_myProjects` | owner | - |
//! | `catalog_dashboard` | wallet? | - |
//! | `catalog_portfolio` | owner | - |
//! | `catalog_formFields` | domain | - |
//! | `catalog_validateForm` | domain, fields, hasDocument? | - |
//!
//! # Errors
//!
//! A rejected registry call returns `-32015` with the failure kind in
//! `data.reason` (`OutOfRange`, `AlreadyVoted`, `NotOwner`, `NotAdmin`,
//! `AlreadySet`, `FeatureDisabled`). A mutation without a caller header
//! returns `-32010`.

#![warn(clippy::all)]
#![deny(unsafe_code)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod domain;
pub mod middleware;
pub mod ports;
pub mod router;
pub mod service;

// Re-exports for public API
pub use domain::config::GatewayConfig;
pub use domain::error::{ApiError, ApiResult, GatewayError};
pub use domain::methods::{get_method_info, is_method_supported, MethodInfo, MethodKind};
pub use domain::types::{JsonRpcId, JsonRpcRequest, JsonRpcResponse};
pub use middleware::{GatewayMetrics, CALLER_HEADER};
pub use ports::RegistryBackend;
pub use service::ApiGatewayService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem ID.
pub const SUBSYSTEM_ID: u8 = 3;

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "API Gateway";
