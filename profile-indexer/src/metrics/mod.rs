//! Pipeline counters.
//!
//! The worker records terminal transitions through an injected recorder
//! rather than process-global counters, keeping the core logic free of
//! shared mutable state and independently testable. A metrics-scrape
//! endpoint, if deployed, reads from the same recorder.

use std::sync::atomic::{AtomicU64, Ordering};

/// Recorder the orchestrator calls on each delivery transition.
pub trait MetricsRecorder: Send + Sync {
    /// A delivery was pulled from the queue.
    fn delivery_received(&self);
    /// A delivery was indexed and acknowledged.
    fn delivery_committed(&self);
    /// A malformed delivery was acknowledged without indexing.
    fn delivery_discarded(&self);
    /// An index write failed; the delivery was left unacknowledged.
    fn delivery_failed(&self);
    /// Current counter values.
    fn snapshot(&self) -> CounterSnapshot;
}

/// Point-in-time view of the pipeline counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CounterSnapshot {
    pub received: u64,
    pub committed: u64,
    pub discarded: u64,
    pub failed: u64,
}

/// Atomic-counter implementation of [`MetricsRecorder`].
#[derive(Debug, Default)]
pub struct PipelineCounters {
    received: AtomicU64,
    committed: AtomicU64,
    discarded: AtomicU64,
    failed: AtomicU64,
}

impl PipelineCounters {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MetricsRecorder for PipelineCounters {
    fn delivery_received(&self) {
        self.received.fetch_add(1, Ordering::Relaxed);
    }

    fn delivery_committed(&self) {
        self.committed.fetch_add(1, Ordering::Relaxed);
    }

    fn delivery_discarded(&self) {
        self.discarded.fetch_add(1, Ordering::Relaxed);
    }

    fn delivery_failed(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            received: self.received.load(Ordering::Relaxed),
            committed: self.committed.load(Ordering::Relaxed),
            discarded: self.discarded.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let counters = PipelineCounters::new();
        assert_eq!(counters.snapshot(), CounterSnapshot::default());
    }

    #[test]
    fn test_each_counter_increments_independently() {
        let counters = PipelineCounters::new();

        counters.delivery_received();
        counters.delivery_received();
        counters.delivery_committed();
        counters.delivery_discarded();

        let snapshot = counters.snapshot();
        assert_eq!(snapshot.received, 2);
        assert_eq!(snapshot.committed, 1);
        assert_eq!(snapshot.discarded, 1);
        assert_eq!(snapshot.failed, 0);
    }
}
