//! Lightweight in-process self-metrics.
//!
//! Counters are stored as atomics and rendered in Prometheus text format by
//! the `/ops/metrics` handler. They describe the service, not the records it
//! holds.

pub mod metrics;

pub use metrics::{CounterVec, SampleKind, ServiceMetrics};
