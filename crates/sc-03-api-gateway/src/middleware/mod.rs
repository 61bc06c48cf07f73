//! HTTP middleware: caller identity, CORS and request counters.

pub mod caller;
pub mod cors;
pub mod metrics;

pub use caller::{caller_from_headers, CALLER_HEADER};
pub use cors::create_cors_layer;
pub use metrics::{GatewayMetrics, MetricsSnapshot};
