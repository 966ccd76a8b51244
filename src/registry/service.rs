//! Registry service shared by the HTTP surface.

use crate::{
    metrics::{MetricsSnapshot, RegistryMetrics},
    registry::{
        record::Record,
        store::Registry,
        types::{LookupQuery, RegistryError},
    },
};

/// Owns the process-wide [`Registry`] and its metrics.
///
/// Construct once at startup and share it through an `Arc`; every request handler works against
/// the same record set.
#[derive(Debug, Default)]
pub struct RegistryService {
    registry: Registry,
    metrics: RegistryMetrics,
}

/// Abstraction over registry operations used by external surfaces.
pub trait RegistryApi: Send + Sync {
    /// Register a new car, returning the stored copy or [`RegistryError::Conflict`].
    fn register(&self, record: Record) -> Result<Record, RegistryError>;

    /// Look up a car by make and/or model. `Ok(None)` means the query matched nothing.
    fn lookup(
        &self,
        make: Option<&str>,
        model: Option<&str>,
    ) -> Result<Option<Record>, RegistryError>;

    /// Retrieve the current metrics snapshot for diagnostics.
    fn metrics_snapshot(&self) -> MetricsSnapshot;
}

impl RegistryService {
    /// Build a service around an empty registry.
    pub fn new() -> Self {
        tracing::debug!("Initializing empty car registry");
        Self::default()
    }
}

impl RegistryApi for RegistryService {
    fn register(&self, record: Record) -> Result<Record, RegistryError> {
        match self.registry.register(record) {
            Ok(stored) => {
                self.metrics.record_registration();
                tracing::info!(
                    id = ?stored.id(),
                    make = ?stored.make(),
                    model = ?stored.model(),
                    "Registered car"
                );
                Ok(stored)
            }
            Err(err) => {
                if err == RegistryError::Conflict {
                    self.metrics.record_conflict();
                }
                tracing::debug!(error = %err, "Registration rejected");
                Err(err)
            }
        }
    }

    fn lookup(
        &self,
        make: Option<&str>,
        model: Option<&str>,
    ) -> Result<Option<Record>, RegistryError> {
        let query = match LookupQuery::new(make, model) {
            Ok(query) => query,
            Err(err) => {
                self.metrics.record_invalid_query();
                tracing::debug!("Lookup rejected: no make or model supplied");
                return Err(err);
            }
        };

        let found = self.registry.find_matching(&query);
        self.metrics.record_lookup(found.is_some());
        tracing::debug!(
            make = ?query.make(),
            model = ?query.model(),
            found = found.is_some(),
            "Lookup completed"
        );
        Ok(found)
    }

    fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot(self.registry.len())
    }
}
