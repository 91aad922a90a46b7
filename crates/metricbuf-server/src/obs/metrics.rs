//! Request counters for the service itself.
//!
//! Counters carry dynamic labels and live in a `DashMap`. Label sets are
//! sorted before use as keys so rendering order does not depend on call sites.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<Vec<(String, String)>, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let mut key: Vec<(String, String)> = labels
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        key.sort();

        let counter = self.map.entry(key).or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value for one label set (0 if never touched).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        let mut key: Vec<(String, String)> = labels
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        key.sort();
        self.map
            .get(&key)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} counter", name);
        let mut rows: Vec<(String, u64)> = self
            .map
            .iter()
            .map(|r| {
                let label_str = r
                    .key()
                    .iter()
                    .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
                    .collect::<Vec<_>>()
                    .join(",");
                (label_str, r.value().load(Ordering::Relaxed))
            })
            .collect();
        rows.sort();
        for (label_str, val) in rows {
            let _ = writeln!(out, "{}{{{}}} {}", name, label_str, val);
        }
    }
}

/// Kind of a caller-supplied sample in [`ServiceMetrics::render`].
#[derive(Debug, Clone, Copy)]
pub enum SampleKind {
    Counter,
    Gauge,
}

impl SampleKind {
    fn as_str(self) -> &'static str {
        match self {
            SampleKind::Counter => "counter",
            SampleKind::Gauge => "gauge",
        }
    }
}

#[derive(Default)]
pub struct ServiceMetrics {
    /// Labels: `method`, `outcome` (`ok` | `rejected` | `error`).
    pub requests: CounterVec,
    /// Labels: `reason` (client code of the rejection).
    pub rejections: CounterVec,
    draining: AtomicBool,
}

impl ServiceMetrics {
    pub fn set_draining(&self) {
        self.draining.store(true, Ordering::Relaxed);
    }

    pub fn is_draining(&self) -> bool {
        self.draining.load(Ordering::Relaxed)
    }

    /// Render all counters plus unlabelled samples provided by the caller.
    pub fn render(&self, extra: &[(&str, SampleKind, u64)]) -> String {
        let mut out = String::new();
        self.requests.render("metricbuf_requests_total", &mut out);
        self.rejections.render("metricbuf_requests_rejected_total", &mut out);

        let _ = writeln!(
            out,
            "# TYPE metricbuf_draining gauge\nmetricbuf_draining {}",
            if self.is_draining() { 1 } else { 0 }
        );
        for (name, kind, v) in extra {
            let _ = writeln!(out, "# TYPE {} {}\n{} {}", name, kind.as_str(), name, v);
        }
        out
    }
}
