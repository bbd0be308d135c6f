//! Pull gauge registry
//!
//! Owns creation and last-value storage for gauge instruments, keyed by
//! metric identity. Creating an entry registers exactly one sampling
//! callback with the backend, which reads the entry's cell on the
//! exporter's schedule. Writes are last-write-wins.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use super::backend::MetricBackend;
use super::identity::MetricIdentity;

/// Single mutable f64 cell shared between writers and the sampling
/// callback. A plain atomic is all the synchronization a lone scalar
/// needs: store on write, load on scrape.
pub struct GaugeCell(AtomicU64);

impl GaugeCell {
    pub fn new() -> Self {
        Self(AtomicU64::new(0.0_f64.to_bits()))
    }

    pub fn set(&self, value: f64) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }

    pub fn get(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Relaxed))
    }
}

impl Default for GaugeCell {
    fn default() -> Self {
        Self::new()
    }
}

/// Concurrency-safe registry of pull gauge instruments
pub struct GaugeRegistry {
    backend: Arc<dyn MetricBackend>,
    namespace: String,
    entries: DashMap<MetricIdentity, Arc<GaugeCell>>,
}

impl GaugeRegistry {
    pub fn new(backend: Arc<dyn MetricBackend>, namespace: impl Into<String>) -> Self {
        Self {
            backend,
            namespace: namespace.into(),
            entries: DashMap::new(),
        }
    }

    /// Overwrite the gauge value for `identity`, creating the entry and
    /// registering its sampling callback on first observation.
    ///
    /// Concurrent writers race freely; whichever store lands last wins.
    /// Racing first-time writers still register exactly one callback.
    pub fn set_value(&self, identity: &MetricIdentity, unit: &str, description: &str, value: f64) {
        if let Some(cell) = self.entries.get(identity) {
            cell.set(value);
            return;
        }

        let cell = self
            .entries
            .entry(identity.clone())
            .or_insert_with(|| {
                tracing::debug!(
                    identity = %identity,
                    backend = self.backend.backend_name(),
                    "registering gauge instrument"
                );
                let cell = Arc::new(GaugeCell::new());
                let reader = Arc::clone(&cell);
                self.backend.register_gauge(
                    &identity.instrument_name(&self.namespace),
                    unit,
                    description,
                    Box::new(move || reader.get()),
                );
                cell
            })
            .clone();
        cell.set(value);
    }

    /// Current value for `identity`, or `0.0` if it was never created.
    ///
    /// The zero default mirrors what the exporter would see polling an
    /// identity that is registered but not yet written; in practice
    /// creation and first write happen together, so this path is for
    /// external callers asking about unknown identities.
    pub fn sample(&self, identity: &MetricIdentity) -> f64 {
        self.entries
            .get(identity)
            .map(|cell| cell.get())
            .unwrap_or(0.0)
    }

    /// Whether an entry exists for `identity`
    pub fn contains(&self, identity: &MetricIdentity) -> bool {
        self.entries.contains_key(identity)
    }

    /// Number of registered gauges
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
