//! # Shared Bus - Registry Event Log
//!
//! Carries the events emitted by committed registry mutations to any number
//! of in-process consumers (node event logger, tests, catalog refreshers).
//!
//! ```text
//! ┌──────────────┐    publish()     ┌──────────────┐   subscribe()   ┌──────────────┐
//! │   Registry   │ ───────────────→ │  Event Bus   │ ──────────────→ │   Consumer   │
//! └──────────────┘                  └──────────────┘                 └──────────────┘
//! ```
//!
//! Events are published in commit order; subscribers receive them in that
//! order and only see events published after they subscribed.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{EventFilter, EventTopic, RegistryEvent};
pub use publisher::{BusStats, EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
