//! # Error Types

use sc_01_project_registry::errors::RegistryError;
use shared_types::TokenId;
use thiserror::Error;

/// Errors from catalog operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A registry call was rejected.
    #[error("registry call failed: {0}")]
    Registry(#[from] RegistryError),

    /// The project was created but attaching its file hash failed.
    #[error("project {token_id} created but storing its file hash failed: {source}")]
    AttestationFailed {
        /// Id of the project that now exists without a hash.
        token_id: TokenId,
        /// Why the store failed.
        source: RegistryError,
    },

    /// Required form fields are empty.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),
}

impl CatalogError {
    /// Stable name for the wire. Registry failures report the registry kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Registry(e) | Self::AttestationFailed { source: e, .. } => e.kind(),
            Self::MissingFields(_) => "MissingFields",
        }
    }
}
