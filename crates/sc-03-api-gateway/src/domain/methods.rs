//! Method registry: every JSON-RPC method the gateway serves.
//!
//! Mutations need a caller identity; reads do not.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Whether a method changes registry state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodKind {
    /// No state change, no identity needed.
    Read,
    /// Commits a transaction on behalf of the caller.
    Mutation,
}

/// Which component answers a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodCategory {
    /// Contract ABI of the registry.
    Registry,
    /// SkillCertifier facade.
    Certifier,
    /// Catalog read model.
    Catalog,
}

/// Method metadata
#[derive(Debug, Clone)]
pub struct MethodInfo {
    /// Wire name, e.g. `submitProject`
    pub name: &'static str,
    /// Read or mutation
    pub kind: MethodKind,
    /// Answering component
    pub category: MethodCategory,
    /// Positional parameters, for error messages
    pub params: &'static [&'static str],
}

impl MethodInfo {
    const fn read(
        name: &'static str,
        category: MethodCategory,
        params: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            kind: MethodKind::Read,
            category,
            params,
        }
    }

    const fn mutation(
        name: &'static str,
        category: MethodCategory,
        params: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            kind: MethodKind::Mutation,
            category,
            params,
        }
    }

    /// Whether the method needs the caller header.
    pub const fn requires_caller(&self) -> bool {
        matches!(self.kind, MethodKind::Mutation)
    }
}

const METHODS: &[MethodInfo] = &[
    // Registry ABI
    MethodInfo::mutation(
        "submitProject",
        MethodCategory::Registry,
        &["name", "githubLink", "tags"],
    ),
    MethodInfo::read("getTotalProjects", MethodCategory::Registry, &[]),
    MethodInfo::read("getProject", MethodCategory::Registry, &["tokenId"]),
    MethodInfo::read("getProjectsOf", MethodCategory::Registry, &["owner"]),
    MethodInfo::mutation("upvoteProject", MethodCategory::Registry, &["tokenId"]),
    MethodInfo::read("getVoteCount", MethodCategory::Registry, &["tokenId"]),
    MethodInfo::mutation("storeFileHash", MethodCategory::Registry, &["tokenId", "fileHash"]),
    MethodInfo::read("getFileHash", MethodCategory::Registry, &["tokenId"]),
    MethodInfo::mutation("setVerifiedIssuer", MethodCategory::Registry, &["issuer", "verified"]),
    MethodInfo::read("isVerifiedIssuer", MethodCategory::Registry, &["issuer"]),
    // SkillCertifier facade
    MethodInfo::mutation(
        "addProject",
        MethodCategory::Certifier,
        &["title", "description", "skills"],
    ),
    MethodInfo::read("getProjects", MethodCategory::Certifier, &["owner"]),
    // Catalog
    MethodInfo::read("catalog_explore", MethodCategory::Catalog, &["query"]),
    MethodInfo::read("catalog_project", MethodCategory::Catalog, &["tokenId"]),
    MethodInfo::read("catalog_myProjects", MethodCategory::Catalog, &["owner"]),
    MethodInfo::read("catalog_dashboard", MethodCategory::Catalog, &["wallet"]),
    MethodInfo::read("catalog_portfolio", MethodCategory::Catalog, &["owner"]),
    MethodInfo::read("catalog_formFields", MethodCategory::Catalog, &["domain"]),
    MethodInfo::read(
        "catalog_validateForm",
        MethodCategory::Catalog,
        &["domain", "fields", "hasDocument"],
    ),
];

/// All methods by name.
pub static METHOD_REGISTRY: LazyLock<HashMap<&'static str, MethodInfo>> =
    LazyLock::new(|| METHODS.iter().map(|m| (m.name, m.clone())).collect());

/// Look up a method.
pub fn get_method_info(method: &str) -> Option<&'static MethodInfo> {
    METHOD_REGISTRY.get(method)
}

/// Whether the gateway serves `method`.
pub fn is_method_supported(method: &str) -> bool {
    METHOD_REGISTRY.contains_key(method)
}
