//! # Event Subscriber
//!
//! Receiving side of the bus. A subscriber that falls more than the channel
//! capacity behind skips the oldest events; [`Subscription::missed`] says
//! how many.

use crate::events::{EventFilter, EventTopic, RegistryEvent};
use std::collections::HashMap;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};
use thiserror::Error;
use tokio::sync::broadcast;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::Stream;
use tracing::{debug, warn};

/// Errors from subscription operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// Every publisher is gone.
    #[error("event bus closed")]
    Closed,
}

/// Live subscription counts per concrete topic.
#[derive(Debug, Default)]
pub(crate) struct TopicRegistrations {
    counts: Mutex<HashMap<EventTopic, usize>>,
}

impl TopicRegistrations {
    fn adjust(&self, filter: &EventFilter, add: bool) {
        let mut counts = self.counts.lock().unwrap_or_else(PoisonError::into_inner);
        for topic in EventTopic::EVERY.into_iter().filter(|t| filter.admits_topic(*t)) {
            let count = counts.entry(topic).or_insert(0);
            *count = if add { *count + 1 } else { count.saturating_sub(1) };
        }
        counts.retain(|_, n| *n > 0);
    }

    pub(crate) fn count(&self, topic: EventTopic) -> usize {
        self.counts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&topic)
            .copied()
            .unwrap_or(0)
    }
}

/// Holds a subscription's place in [`TopicRegistrations`] until dropped.
struct Registration {
    registrations: Arc<TopicRegistrations>,
    filter: EventFilter,
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.registrations.adjust(&self.filter, false);
        debug!(topics = ?self.filter.topics, "Registry event subscription closed");
    }
}

/// A filtered view of the bus.
pub struct Subscription {
    receiver: broadcast::Receiver<RegistryEvent>,
    missed: u64,
    registration: Registration,
}

impl Subscription {
    pub(crate) fn new(
        receiver: broadcast::Receiver<RegistryEvent>,
        filter: EventFilter,
        registrations: Arc<TopicRegistrations>,
    ) -> Self {
        registrations.adjust(&filter, true);
        Self {
            receiver,
            missed: 0,
            registration: Registration {
                registrations,
                filter,
            },
        }
    }

    /// Next matching event, or `None` once the bus is gone and the buffer
    /// is empty.
    pub async fn recv(&mut self) -> Option<RegistryEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if self.registration.filter.matches(&event) => return Some(event),
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(skipped)) => self.record_lag(skipped),
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Next matching event if one is already buffered.
    pub fn try_recv(&mut self) -> Result<Option<RegistryEvent>, SubscriptionError> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) if self.registration.filter.matches(&event) => return Ok(Some(event)),
                Ok(_) => {}
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => self.record_lag(skipped),
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(broadcast::error::TryRecvError::Closed) => {
                    return Err(SubscriptionError::Closed)
                }
            }
        }
    }

    /// Every matching event currently buffered, oldest first.
    pub fn drain(&mut self) -> Result<Vec<RegistryEvent>, SubscriptionError> {
        let mut out = Vec::new();
        while let Some(event) = self.try_recv()? {
            out.push(event);
        }
        Ok(out)
    }

    /// Events skipped because this subscriber fell behind. Counts every
    /// skipped event, matching or not.
    #[must_use]
    pub fn missed(&self) -> u64 {
        self.missed
    }

    /// The filter this subscription applies.
    #[must_use]
    pub fn event_filter(&self) -> &EventFilter {
        &self.registration.filter
    }

    fn record_lag(&mut self, skipped: u64) {
        self.missed += skipped;
        warn!(skipped, total_missed = self.missed, "Registry event subscriber fell behind");
    }
}

/// [`Subscription`] as a `tokio_stream::Stream`.
pub struct EventStream {
    inner: BroadcastStream<RegistryEvent>,
    registration: Registration,
}

impl EventStream {
    /// Wrap a subscription. Its missed counter does not carry over.
    #[must_use]
    pub fn new(subscription: Subscription) -> Self {
        let Subscription {
            receiver,
            registration,
            ..
        } = subscription;
        Self {
            inner: BroadcastStream::new(receiver),
            registration,
        }
    }

    /// The filter this stream applies.
    #[must_use]
    pub fn event_filter(&self) -> &EventFilter {
        &self.registration.filter
    }
}

impl Stream for EventStream {
    type Item = RegistryEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        loop {
            match Pin::new(&mut self.inner).poll_next(cx) {
                Poll::Ready(Some(Ok(event))) if self.registration.filter.matches(&event) => {
                    return Poll::Ready(Some(event))
                }
                Poll::Ready(Some(Ok(_))) => {}
                Poll::Ready(Some(Err(BroadcastStreamRecvError::Lagged(skipped)))) => {
                    warn!(skipped, "Registry event stream fell behind");
                }
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
