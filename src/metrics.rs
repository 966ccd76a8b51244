use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters describing registry activity.
#[derive(Debug, Default)]
pub struct RegistryMetrics {
    registrations: AtomicU64,
    conflicts: AtomicU64,
    lookup_hits: AtomicU64,
    lookup_misses: AtomicU64,
    invalid_queries: AtomicU64,
}

impl RegistryMetrics {
    /// Create an empty metrics accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful registration.
    pub fn record_registration(&self) {
        self.registrations.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a registration rejected as a duplicate.
    pub fn record_conflict(&self) {
        self.conflicts.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the result of a valid lookup.
    pub fn record_lookup(&self, found: bool) {
        let counter = if found {
            &self.lookup_hits
        } else {
            &self.lookup_misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a lookup rejected for lacking filter terms.
    pub fn record_invalid_query(&self) {
        self.invalid_queries.fetch_add(1, Ordering::Relaxed);
    }

    /// Return a snapshot of the current counters alongside the stored record count.
    pub fn snapshot(&self, records_stored: usize) -> MetricsSnapshot {
        MetricsSnapshot {
            records_stored: records_stored as u64,
            registrations: self.registrations.load(Ordering::Relaxed),
            conflicts: self.conflicts.load(Ordering::Relaxed),
            lookup_hits: self.lookup_hits.load(Ordering::Relaxed),
            lookup_misses: self.lookup_misses.load(Ordering::Relaxed),
            invalid_queries: self.invalid_queries.load(Ordering::Relaxed),
        }
    }
}

/// Immutable view of registry counters used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MetricsSnapshot {
    /// Records currently held in the registry.
    pub records_stored: u64,
    /// Registrations accepted since startup.
    pub registrations: u64,
    /// Registrations rejected because the pair already existed.
    pub conflicts: u64,
    /// Lookups that returned a record.
    pub lookup_hits: u64,
    /// Valid lookups that matched nothing.
    pub lookup_misses: u64,
    /// Lookups rejected for supplying no filter.
    pub invalid_queries: u64,
}
