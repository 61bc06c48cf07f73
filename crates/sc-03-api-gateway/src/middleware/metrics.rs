//! Request counters, reported by `/health`.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Gateway request counters
#[derive(Debug, Default)]
pub struct GatewayMetrics {
    requests_total: AtomicU64,
    requests_success: AtomicU64,
    requests_error: AtomicU64,
    mutations_total: AtomicU64,
    batches_total: AtomicU64,
}

/// Point-in-time copy of [`GatewayMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub requests_total: u64,
    pub requests_success: u64,
    pub requests_error: u64,
    pub mutations_total: u64,
    pub batches_total: u64,
}

impl GatewayMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one JSON-RPC call
    pub fn record_request(&self, success: bool, is_mutation: bool) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);

        if success {
            self.requests_success.fetch_add(1, Ordering::Relaxed);
        } else {
            self.requests_error.fetch_add(1, Ordering::Relaxed);
        }

        if is_mutation {
            self.mutations_total.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record one batch envelope
    pub fn record_batch(&self) {
        self.batches_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests_total: self.requests_total.load(Ordering::Relaxed),
            requests_success: self.requests_success.load(Ordering::Relaxed),
            requests_error: self.requests_error.load(Ordering::Relaxed),
            mutations_total: self.mutations_total.load(Ordering::Relaxed),
            batches_total: self.batches_total.load(Ordering::Relaxed),
        }
    }
}
