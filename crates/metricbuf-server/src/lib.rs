//! metricbuf server library entry.
//!
//! Wires the config loader, shared state, HTTP handlers and self-metrics
//! around the `metricbuf-core` buffer. Consumed by the binary (`main.rs`) and
//! by integration tests.

pub mod api;
pub mod app_state;
pub mod config;
pub mod obs;
pub mod ops;
pub mod router;
pub mod shutdown;
