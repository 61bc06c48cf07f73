//! # Driven Ports (SPI - Outbound)
//!
//! What the registry depends on: a source of block time. Event publication
//! goes through `shared_bus::EventPublisher`.

use shared_types::Timestamp;

/// Source of the "current block time" stamped on new projects.
pub trait BlockClock: Send + Sync {
    /// Current Unix time in seconds.
    fn now(&self) -> Timestamp;
}
