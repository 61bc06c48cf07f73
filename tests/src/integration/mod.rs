//! Cross-subsystem integration tests.

mod catalog_flows;
mod gateway_flows;
mod node_flows;
mod properties;
mod registry_flows;
