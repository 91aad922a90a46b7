//! Bounded, FIFO-evicting record buffer.
//!
//! Records are kept in a `VecDeque` behind a single `parking_lot::Mutex`.
//! `append` pushes to the back and pops at most one record from the front
//! inside the same critical section, so readers never see the buffer above
//! capacity. `snapshot` clones the whole deque under the lock and hands the
//! caller an owned `Vec`; later appends cannot change it.
//!
//! Nothing in this module awaits or does I/O while the lock is held.

use std::collections::VecDeque;

use parking_lot::Mutex;

/// One opaque telemetry entry, stored and returned verbatim.
pub type MetricRecord = serde_json::Value;

/// Capacity used when none is configured.
pub const DEFAULT_CAPACITY: usize = 100;

/// Point-in-time view of the buffer's size and lifetime counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferStats {
    pub len: usize,
    pub capacity: usize,
    /// Records accepted since start.
    pub appended_total: u64,
    /// Records dropped from the head since start.
    pub evicted_total: u64,
}

/// What a single `append` did, read under the same lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Appended {
    /// Buffer length right after this append.
    pub len: usize,
    /// Whether the oldest record was dropped to make room.
    pub evicted: bool,
}

#[derive(Debug)]
struct Inner {
    records: VecDeque<MetricRecord>,
    appended_total: u64,
    evicted_total: u64,
}

/// Fixed-capacity FIFO of [`MetricRecord`], shared by reference across tasks.
#[derive(Debug)]
pub struct MetricsBuffer {
    capacity: usize,
    inner: Mutex<Inner>,
}

impl Default for MetricsBuffer {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl MetricsBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A capacity of 0 is raised to 1.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            inner: Mutex::new(Inner {
                records: VecDeque::with_capacity(capacity + 1),
                appended_total: 0,
                evicted_total: 0,
            }),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append at the tail; drop the oldest record if that puts us over capacity.
    pub fn append(&self, record: MetricRecord) -> Appended {
        let appended = {
            let mut inner = self.inner.lock();
            inner.records.push_back(record);
            inner.appended_total += 1;
            let evicted = inner.records.len() > self.capacity;
            if evicted {
                inner.records.pop_front();
                inner.evicted_total += 1;
            }
            Appended { len: inner.records.len(), evicted }
        };

        if appended.evicted {
            tracing::trace!(capacity = self.capacity, "evicted oldest record");
        }
        appended
    }

    /// Owned copy of all held records, oldest first.
    pub fn snapshot(&self) -> Vec<MetricRecord> {
        let inner = self.inner.lock();
        inner.records.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().records.is_empty()
    }

    pub fn stats(&self) -> BufferStats {
        let inner = self.inner.lock();
        BufferStats {
            len: inner.records.len(),
            capacity: self.capacity,
            appended_total: inner.appended_total,
            evicted_total: inner.evicted_total,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ids(records: &[MetricRecord]) -> Vec<u64> {
        records.iter().map(|r| r["id"].as_u64().unwrap()).collect()
    }

    #[test]
    fn empty_buffer_snapshots_empty() {
        let buf = MetricsBuffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), DEFAULT_CAPACITY);
        assert!(buf.snapshot().is_empty());
    }

    #[test]
    fn length_is_min_of_appends_and_capacity() {
        for n in [0usize, 1, 4, 5, 6, 17] {
            let buf = MetricsBuffer::with_capacity(5);
            for i in 0..n {
                buf.append(json!({ "id": i }));
            }
            assert_eq!(buf.snapshot().len(), n.min(5), "n={n}");
            assert_eq!(buf.len(), n.min(5));
        }
    }

    #[test]
    fn keeps_insertion_order() {
        let buf = MetricsBuffer::with_capacity(10);
        for i in 0..7u64 {
            buf.append(json!({ "id": i }));
        }
        assert_eq!(ids(&buf.snapshot()), (0..7).collect::<Vec<_>>());
    }

    #[test]
    fn evicts_oldest_first() {
        let buf = MetricsBuffer::with_capacity(3);
        let mut evictions = 0;
        for i in 0..6u64 {
            let appended = buf.append(json!({ "id": i }));
            assert_eq!(appended.len, (i as usize + 1).min(3));
            if appended.evicted {
                evictions += 1;
            }
        }
        assert_eq!(evictions, 3);
        assert_eq!(ids(&buf.snapshot()), vec![3, 4, 5]);
    }

    #[test]
    fn default_capacity_drops_first_of_101() {
        let buf = MetricsBuffer::new();
        for i in 0..=100u64 {
            buf.append(json!({ "id": i }));
        }
        let snap = buf.snapshot();
        assert_eq!(snap.len(), 100);
        assert_eq!(ids(&snap), (1..=100).collect::<Vec<_>>());
    }

    #[test]
    fn repeated_snapshot_is_identical() {
        let buf = MetricsBuffer::with_capacity(4);
        buf.append(json!({ "cpu": 10 }));
        buf.append(json!(["a", null, 1.5]));
        assert_eq!(buf.snapshot(), buf.snapshot());
    }

    #[test]
    fn snapshot_is_not_affected_by_later_appends() {
        let buf = MetricsBuffer::with_capacity(2);
        buf.append(json!({ "id": 0 }));
        let before = buf.snapshot();
        buf.append(json!({ "id": 1 }));
        buf.append(json!({ "id": 2 }));
        assert_eq!(ids(&before), vec![0]);
        assert_eq!(ids(&buf.snapshot()), vec![1, 2]);
    }

    #[test]
    fn records_are_stored_verbatim() {
        let buf = MetricsBuffer::new();
        let rec = json!({ "nested": { "a": [1, 2, { "b": null }] }, "flag": true, "s": "x" });
        buf.append(rec.clone());
        assert_eq!(buf.snapshot(), vec![rec]);
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let buf = MetricsBuffer::with_capacity(0);
        assert_eq!(buf.capacity(), 1);
        buf.append(json!({ "id": 0 }));
        buf.append(json!({ "id": 1 }));
        assert_eq!(ids(&buf.snapshot()), vec![1]);
    }

    #[test]
    fn stats_track_lifetime_counters() {
        let buf = MetricsBuffer::with_capacity(2);
        for i in 0..5u64 {
            buf.append(json!({ "id": i }));
        }
        assert_eq!(
            buf.stats(),
            BufferStats {
                len: 2,
                capacity: 2,
                appended_total: 5,
                evicted_total: 3,
            }
        );
    }
}
