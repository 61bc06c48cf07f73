//! # Driven Port
//!
//! What the gateway needs from the registry: the contract ABI and the
//! certifier facade over the same state.

use sc_01_project_registry::ports::{ProjectRegistryApi, SkillCertifierApi};

/// A registry the gateway can serve.
pub trait RegistryBackend: ProjectRegistryApi + SkillCertifierApi {}

impl<T> RegistryBackend for T where T: ProjectRegistryApi + SkillCertifierApi {}
