//! # Registry Configuration
//!
//! Deployment-time choices for a registry instance: who the admin is, which
//! contract variant is deployed (and so which features are live), and how
//! file-hash attestations behave once set.
//!
//! ## Environment Variables
//!
//! | Variable | Values | Default |
//! |----------|--------|---------|
//! | `SKILLCHAIN_ADMIN` | `0x`-prefixed 20-byte hex | required |
//! | `SKILLCHAIN_VARIANT` | `certifier`, `skillchain`, `multi-domain` | `multi-domain` |
//! | `SKILLCHAIN_FILE_HASH_POLICY` | `write-once`, `overwrite` | `write-once` |
//! | `SKILLCHAIN_VERIFY_INVARIANTS` | `true`, `false` | `false` |

use serde::{Deserialize, Serialize};
use shared_types::Address;
use std::env;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// FEATURES
// =============================================================================

/// A capability that a deployment may or may not enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Feature {
    /// One-vote-per-address upvoting.
    Voting,
    /// Owner-attached file content hashes.
    FileHash,
    /// Admin-managed verified issuer flags.
    IssuerRegistry,
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Voting => "voting",
            Self::FileHash => "file hash",
            Self::IssuerRegistry => "issuer registry",
        };
        f.write_str(name)
    }
}

/// The set of enabled features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureSet {
    /// Upvoting enabled.
    pub voting: bool,
    /// File-hash attestations enabled.
    pub file_hash: bool,
    /// Verified issuer registry enabled.
    pub issuer_registry: bool,
}

impl FeatureSet {
    /// Every feature enabled.
    pub const ALL: Self = Self {
        voting: true,
        file_hash: true,
        issuer_registry: true,
    };

    /// Only project creation and reads.
    pub const NONE: Self = Self {
        voting: false,
        file_hash: false,
        issuer_registry: false,
    };

    /// Whether a feature is enabled.
    #[must_use]
    pub const fn contains(&self, feature: Feature) -> bool {
        match feature {
            Feature::Voting => self.voting,
            Feature::FileHash => self.file_hash,
            Feature::IssuerRegistry => self.issuer_registry,
        }
    }
}

// =============================================================================
// VARIANTS
// =============================================================================

/// Which registry contract is deployed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContractVariant {
    /// Title/description/skills records only.
    SkillCertifier,
    /// Projects, upvotes and file hashes.
    SkillChain,
    /// SkillChain plus the verified issuer registry.
    #[default]
    MultiDomain,
}

impl ContractVariant {
    /// Features this variant ships with.
    #[must_use]
    pub const fn features(&self) -> FeatureSet {
        match self {
            Self::SkillCertifier => FeatureSet::NONE,
            Self::SkillChain => FeatureSet {
                voting: true,
                file_hash: true,
                issuer_registry: false,
            },
            Self::MultiDomain => FeatureSet::ALL,
        }
    }

    /// Environment/CLI spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SkillCertifier => "certifier",
            Self::SkillChain => "skillchain",
            Self::MultiDomain => "multi-domain",
        }
    }
}

impl fmt::Display for ContractVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContractVariant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "certifier" | "skill-certifier" => Ok(Self::SkillCertifier),
            "skillchain" | "skill-chain" => Ok(Self::SkillChain),
            "multi-domain" | "multidomain" => Ok(Self::MultiDomain),
            _ => Err(ConfigError::InvalidValue {
                var: ENV_VARIANT,
                value: s.to_string(),
            }),
        }
    }
}

/// What happens when the owner stores a second file hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileHashPolicy {
    /// The first stored hash is final; later stores fail with `AlreadySet`.
    #[default]
    WriteOnce,
    /// Each store replaces the previous hash.
    Overwrite,
}

impl FromStr for FileHashPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "write-once" | "writeonce" => Ok(Self::WriteOnce),
            "overwrite" => Ok(Self::Overwrite),
            _ => Err(ConfigError::InvalidValue {
                var: ENV_FILE_HASH_POLICY,
                value: s.to_string(),
            }),
        }
    }
}

// =============================================================================
// CONFIG
// =============================================================================

/// Admin address variable.
pub const ENV_ADMIN: &str = "SKILLCHAIN_ADMIN";
/// Contract variant variable.
pub const ENV_VARIANT: &str = "SKILLCHAIN_VARIANT";
/// File-hash policy variable.
pub const ENV_FILE_HASH_POLICY: &str = "SKILLCHAIN_FILE_HASH_POLICY";
/// Post-commit invariant checking variable.
pub const ENV_VERIFY_INVARIANTS: &str = "SKILLCHAIN_VERIFY_INVARIANTS";

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("missing required setting {0}")]
    Missing(&'static str),

    /// A variable holds a value that does not parse.
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue {
        /// Variable name.
        var: &'static str,
        /// Offending value.
        value: String,
    },

    /// The admin address is the zero address.
    #[error("admin must not be the zero address")]
    ZeroAdmin,
}

/// Registry deployment configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryConfig {
    /// Deployer; fixed for the registry's lifetime.
    pub admin: Address,
    /// Deployed contract variant.
    pub variant: ContractVariant,
    /// Enabled features. Normally `variant.features()`.
    pub features: FeatureSet,
    /// Second-store behavior for file hashes.
    pub file_hash_policy: FileHashPolicy,
    /// Run the ledger invariant checks after every commit.
    pub verify_invariants: bool,
}

impl RegistryConfig {
    /// Configuration for a variant with its stock features.
    #[must_use]
    pub fn for_variant(admin: Address, variant: ContractVariant) -> Self {
        Self {
            admin,
            variant,
            features: variant.features(),
            file_hash_policy: FileHashPolicy::default(),
            verify_invariants: false,
        }
    }

    /// Set the file-hash policy.
    #[must_use]
    pub fn with_file_hash_policy(mut self, policy: FileHashPolicy) -> Self {
        self.file_hash_policy = policy;
        self
    }

    /// Enable or disable post-commit invariant checks.
    #[must_use]
    pub fn with_invariant_checks(mut self, enabled: bool) -> Self {
        self.verify_invariants = enabled;
        self
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_admin = env::var(ENV_ADMIN).map_err(|_| ConfigError::Missing(ENV_ADMIN))?;
        let admin = raw_admin
            .parse::<Address>()
            .map_err(|_| ConfigError::InvalidValue {
                var: ENV_ADMIN,
                value: raw_admin.clone(),
            })?;

        let variant = match env::var(ENV_VARIANT) {
            Ok(v) => v.parse()?,
            Err(_) => ContractVariant::default(),
        };

        let file_hash_policy = match env::var(ENV_FILE_HASH_POLICY) {
            Ok(v) => v.parse()?,
            Err(_) => FileHashPolicy::default(),
        };

        let verify_invariants = match env::var(ENV_VERIFY_INVARIANTS) {
            Ok(v) => parse_bool(ENV_VERIFY_INVARIANTS, &v)?,
            Err(_) => false,
        };

        let config = Self::for_variant(admin, variant)
            .with_file_hash_policy(file_hash_policy)
            .with_invariant_checks(verify_invariants);
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.admin.is_zero() {
            return Err(ConfigError::ZeroAdmin);
        }
        Ok(())
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::for_variant(Address::new([0x01; 20]), ContractVariant::default())
    }
}

/// Parse a boolean flag the way the node's other settings do.
pub fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            var,
            value: value.to_string(),
        }),
    }
}

// =============================================================================
// TESTS
// =============================================================================
