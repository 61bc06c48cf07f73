//! # Event Publisher
//!
//! The registry publishes each committed mutation's events here, in commit
//! order. Delivery is fire-and-forget: a commit never waits on a consumer.

use crate::events::{EventFilter, EventTopic, RegistryEvent};
use crate::subscriber::{EventStream, Subscription, TopicRegistrations};
use crate::DEFAULT_CHANNEL_CAPACITY;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, trace};

/// Sink for registry events.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Hand one event to every live subscriber; returns how many there were.
    async fn publish(&self, event: RegistryEvent) -> usize;

    /// Events handed to [`publish`](Self::publish) so far.
    fn events_published(&self) -> u64;
}

/// Counters of an [`InMemoryEventBus`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusStats {
    /// Every event published.
    pub published: u64,
    /// Published while nobody was subscribed.
    pub unobserved: u64,
    /// Live subscriptions.
    pub subscribers: usize,
}

/// Broadcast bus kept in process memory.
///
/// A subscription sees only events published after it was created, so
/// consumers that need deployment events subscribe before deploying.
pub struct InMemoryEventBus {
    sender: broadcast::Sender<RegistryEvent>,
    registrations: Arc<TopicRegistrations>,
    published: AtomicU64,
    unobserved: AtomicU64,
    capacity: usize,
}

impl InMemoryEventBus {
    /// Bus with [`DEFAULT_CHANNEL_CAPACITY`] slots per subscriber.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Bus buffering up to `capacity` events per subscriber. Slower
    /// subscribers skip ahead and count what they missed.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            registrations: Arc::new(TopicRegistrations::default()),
            published: AtomicU64::new(0),
            unobserved: AtomicU64::new(0),
            capacity: capacity.max(1),
        }
    }

    /// Subscribe to events passing `filter`.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        debug!(
            topics = ?filter.topics,
            token_id = ?filter.token_id,
            "Registry event subscription opened"
        );
        Subscription::new(
            self.sender.subscribe(),
            filter,
            Arc::clone(&self.registrations),
        )
    }

    /// Subscribe and adapt to a `Stream`.
    #[must_use]
    pub fn event_stream(&self, filter: EventFilter) -> EventStream {
        EventStream::new(self.subscribe(filter))
    }

    /// Live subscriptions, whatever their filter.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Live subscriptions that would receive events of `topic`.
    #[must_use]
    pub fn subscribers_to(&self, topic: EventTopic) -> usize {
        self.registrations.count(topic)
    }

    /// Per-subscriber buffer size.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current counters.
    #[must_use]
    pub fn stats(&self) -> BusStats {
        BusStats {
            published: self.published.load(Ordering::Relaxed),
            unobserved: self.unobserved.load(Ordering::Relaxed),
            subscribers: self.subscriber_count(),
        }
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: RegistryEvent) -> usize {
        let topic = event.topic();
        self.published.fetch_add(1, Ordering::Relaxed);

        match self.sender.send(event) {
            Ok(receivers) => {
                trace!(?topic, receivers, "Registry event delivered");
                receivers
            }
            Err(_) => {
                // Normal before anyone subscribes, e.g. during deployment.
                self.unobserved.fetch_add(1, Ordering::Relaxed);
                trace!(?topic, "Registry event unobserved");
                0
            }
        }
    }

    fn events_published(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }
}
