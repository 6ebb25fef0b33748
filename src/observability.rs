//! Observability hooks for data service operations.
//!
//! Implement [`ServiceMetrics`] to feed service activity into your monitoring
//! system:
//!
//! ```ignore
//! use data_kit::observability::ServiceMetrics;
//! use data_kit::key::RecordKey;
//! use std::time::Duration;
//!
//! struct PrometheusMetrics;
//!
//! impl ServiceMetrics for PrometheusMetrics {
//!     fn record_hit(&self, _key: &RecordKey, _duration: Duration) {
//!         // counter!("store_hits").inc();
//!     }
//!     // ... implement other methods
//! }
//!
//! // let service = InMemoryDataService::<Customer>::new()
//! //     .with_metrics(Arc::new(PrometheusMetrics));
//! ```
//!
//! Services default to [`NoOpMetrics`]. The trait's own default methods log
//! through the `log` crate, so an empty `impl ServiceMetrics for X {}` gives a
//! logging sink for free. [`CountingMetrics`] keeps a request counter per
//! operation.

use crate::key::RecordKey;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Trait for data service metrics collection.
///
/// Keys of `get_all` calls carry the kind and an id of `0`.
pub trait ServiceMetrics: Send + Sync {
    /// Record a successful insert.
    fn record_add(&self, key: &RecordKey, duration: Duration) {
        debug!("Store ADD: {} took {:?}", key, duration);
    }

    /// Record a read that found its record(s).
    fn record_hit(&self, key: &RecordKey, duration: Duration) {
        debug!("Store HIT: {} took {:?}", key, duration);
    }

    /// Record a read, update or delete that found nothing.
    fn record_miss(&self, key: &RecordKey, duration: Duration) {
        debug!("Store MISS: {} took {:?}", key, duration);
    }

    /// Record a successful update.
    fn record_update(&self, key: &RecordKey, duration: Duration) {
        debug!("Store UPDATE: {} took {:?}", key, duration);
    }

    /// Record a successful delete.
    fn record_delete(&self, key: &RecordKey, duration: Duration) {
        debug!("Store DELETE: {} took {:?}", key, duration);
    }

    /// Record a rejected operation.
    fn record_error(&self, key: &RecordKey, error: &str) {
        warn!("Store ERROR for {}: {}", key, error);
    }
}

/// Default metrics implementation (no-op).
#[derive(Clone, Default)]
pub struct NoOpMetrics;

impl ServiceMetrics for NoOpMetrics {
    fn record_add(&self, _key: &RecordKey, _duration: Duration) {}
    fn record_hit(&self, _key: &RecordKey, _duration: Duration) {}
    fn record_miss(&self, _key: &RecordKey, _duration: Duration) {}
    fn record_update(&self, _key: &RecordKey, _duration: Duration) {}
    fn record_delete(&self, _key: &RecordKey, _duration: Duration) {}
    fn record_error(&self, _key: &RecordKey, _error: &str) {}
}

/// Request counters, one per outcome.
#[derive(Default)]
pub struct CountingMetrics {
    adds: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    updates: AtomicU64,
    deletes: AtomicU64,
    errors: AtomicU64,
}

/// Point-in-time copy of [`CountingMetrics`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequestCounts {
    pub adds: u64,
    pub hits: u64,
    pub misses: u64,
    pub updates: u64,
    pub deletes: u64,
    pub errors: u64,
}

impl RequestCounts {
    /// Total number of requests served, rejected ones included.
    pub fn total(&self) -> u64 {
        self.adds + self.hits + self.misses + self.updates + self.deletes + self.errors
    }
}

impl CountingMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the counters.
    pub fn counts(&self) -> RequestCounts {
        RequestCounts {
            adds: self.adds.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            updates: self.updates.load(Ordering::Relaxed),
            deletes: self.deletes.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
        }
    }
}

impl ServiceMetrics for CountingMetrics {
    fn record_add(&self, _key: &RecordKey, _duration: Duration) {
        self.adds.fetch_add(1, Ordering::Relaxed);
    }

    fn record_hit(&self, _key: &RecordKey, _duration: Duration) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    fn record_miss(&self, _key: &RecordKey, _duration: Duration) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    fn record_update(&self, _key: &RecordKey, _duration: Duration) {
        self.updates.fetch_add(1, Ordering::Relaxed);
    }

    fn record_delete(&self, _key: &RecordKey, _duration: Duration) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    fn record_error(&self, key: &RecordKey, error: &str) {
        self.errors.fetch_add(1, Ordering::Relaxed);
        warn!("Store ERROR for {}: {}", key, error);
    }
}
