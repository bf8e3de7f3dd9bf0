//! Ring observability counters.
//!
//! The hot path must not call into the OS, so there is no logging crate
//! here — observability is a plain atomic counter struct, read out through
//! `Ring::metrics()` as a point-in-time snapshot.

use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counters updated on the hot path with `Relaxed` ordering — these
/// are advisory instrumentation, not part of the correctness protocol.
#[derive(Debug, Default)]
pub struct Metrics {
    messages_produced: AtomicU64,
    messages_consumed: AtomicU64,
    teleports_producer: AtomicU64,
    teleports_consumer: AtomicU64,
    defensive_recoveries: AtomicU64,
}

impl Metrics {
    pub(crate) const fn new() -> Self {
        Self {
            messages_produced: AtomicU64::new(0),
            messages_consumed: AtomicU64::new(0),
            teleports_producer: AtomicU64::new(0),
            teleports_consumer: AtomicU64::new(0),
            defensive_recoveries: AtomicU64::new(0),
        }
    }

    pub(crate) fn record_produce(&self) {
        self.messages_produced.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_consume(&self) {
        self.messages_consumed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_producer_teleport(&self) {
        self.teleports_producer.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_consumer_teleport(&self) {
        self.teleports_consumer.fetch_add(1, Ordering::Relaxed);
    }

    /// Records when `peek` observes `cur_tail > cur_head` at end-of-lap (the
    /// original author's "generally impossible" case) and recovers by CASing
    /// `head` forward to `tail` instead of treating it as corruption.
    pub(crate) fn record_defensive_recovery(&self) {
        self.defensive_recoveries.fetch_add(1, Ordering::Relaxed);
    }

    /// Takes an atomic snapshot of all counters.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            messages_produced: self.messages_produced.load(Ordering::Relaxed),
            messages_consumed: self.messages_consumed.load(Ordering::Relaxed),
            teleports_producer: self.teleports_producer.load(Ordering::Relaxed),
            teleports_consumer: self.teleports_consumer.load(Ordering::Relaxed),
            defensive_recoveries: self.defensive_recoveries.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time copy of [`Metrics`], safe to move or print.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub messages_produced: u64,
    pub messages_consumed: u64,
    pub teleports_producer: u64,
    pub teleports_consumer: u64,
    pub defensive_recoveries: u64,
}
