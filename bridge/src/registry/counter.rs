//! Push counter registry
//!
//! Owns creation and value accumulation for counter instruments, keyed
//! by metric identity. Creation is exactly-once per identity; the
//! steady-state add path never takes the creation lock.

use std::sync::Arc;

use dashmap::DashMap;

use super::backend::{CounterHandle, MetricBackend};
use super::identity::MetricIdentity;

/// Concurrency-safe registry of cumulative counter instruments
pub struct CounterRegistry {
    backend: Arc<dyn MetricBackend>,
    namespace: String,
    entries: DashMap<MetricIdentity, Arc<dyn CounterHandle>>,
}

impl CounterRegistry {
    pub fn new(backend: Arc<dyn MetricBackend>, namespace: impl Into<String>) -> Self {
        Self {
            backend,
            namespace: namespace.into(),
            entries: DashMap::new(),
        }
    }

    /// Add a delta to the instrument for `identity`, creating it on
    /// first observation.
    ///
    /// Unit and description are fixed from the first observed update;
    /// later updates never alter them. Concurrent first-time calls for
    /// the same identity produce exactly one instrument, and every
    /// caller's delta is applied to it.
    pub fn add_value(&self, identity: &MetricIdentity, unit: &str, description: &str, delta: f64) {
        // Optimistic read: already-created identities take a shard read
        // lock only, so creation contention never serializes them.
        if let Some(entry) = self.entries.get(identity) {
            entry.add(delta);
            return;
        }

        // Miss: the entry lock re-checks under the shard write lock, so
        // racing creators agree on a single instrument.
        let handle = self
            .entries
            .entry(identity.clone())
            .or_insert_with(|| {
                tracing::debug!(
                    identity = %identity,
                    backend = self.backend.backend_name(),
                    "creating counter instrument"
                );
                self.backend.create_counter(
                    &identity.instrument_name(&self.namespace),
                    unit,
                    description,
                )
            })
            .clone();
        handle.add(delta);
    }

    /// Whether an instrument exists for `identity`
    pub fn contains(&self, identity: &MetricIdentity) -> bool {
        self.entries.contains_key(identity)
    }

    /// Number of created instruments
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
