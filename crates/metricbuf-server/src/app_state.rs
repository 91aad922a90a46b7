//! Shared application state for the metricbuf server.
//!
//! One `MetricsBuffer` per process, reached by every handler through a cheap
//! `Clone` of this struct.

use std::sync::Arc;

use metricbuf_core::MetricsBuffer;

use crate::config::ServiceConfig;
use crate::obs::{SampleKind, ServiceMetrics};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ServiceConfig,
    buffer: MetricsBuffer,
    metrics: ServiceMetrics,
}

impl AppState {
    pub fn new(cfg: ServiceConfig) -> Self {
        let buffer = MetricsBuffer::with_capacity(cfg.buffer.capacity);
        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                buffer,
                metrics: ServiceMetrics::default(),
            }),
        }
    }

    pub fn cfg(&self) -> &ServiceConfig {
        &self.inner.cfg
    }

    pub fn buffer(&self) -> &MetricsBuffer {
        &self.inner.buffer
    }

    pub fn metrics(&self) -> &ServiceMetrics {
        &self.inner.metrics
    }

    pub fn set_draining(&self) {
        self.inner.metrics.set_draining();
    }

    pub fn is_draining(&self) -> bool {
        self.inner.metrics.is_draining()
    }

    /// Buffer samples appended to the `/ops/metrics` output.
    pub fn metrics_extra(&self) -> Vec<(&'static str, SampleKind, u64)> {
        let s = self.inner.buffer.stats();
        vec![
            ("metricbuf_records_appended_total", SampleKind::Counter, s.appended_total),
            ("metricbuf_records_evicted_total", SampleKind::Counter, s.evicted_total),
            ("metricbuf_buffer_records", SampleKind::Gauge, s.len as u64),
            ("metricbuf_buffer_capacity", SampleKind::Gauge, s.capacity as u64),
        ]
    }
}
