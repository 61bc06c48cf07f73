//! # Ports Layer
//!
//! Inbound ports are implemented by the service; outbound ports are
//! implemented by adapters.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
