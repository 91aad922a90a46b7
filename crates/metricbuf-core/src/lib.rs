//! metricbuf core: the bounded in-memory record buffer and the error surface.
//!
//! This crate holds the only stateful piece of the service: a fixed-capacity,
//! FIFO-evicting buffer of schema-less JSON records that is shared between
//! concurrent writers and readers. It carries no HTTP or runtime dependencies
//! so it can be tested and reused on its own.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Buffer operations are total; fallible paths elsewhere surface as
//! `MetricBufError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod buffer;
pub mod error;

pub use buffer::{Appended, BufferStats, MetricRecord, MetricsBuffer, DEFAULT_CAPACITY};
/// Shared result type.
pub use error::{MetricBufError, Result};
