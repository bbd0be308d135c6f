//! Metric backend trait
//!
//! The seam between the registries and whatever export pipeline the
//! embedding application wires up. The registries own identity and
//! value semantics; the backend owns instrument creation and the
//! scrape-side machinery.

use std::sync::Arc;

/// Handle to a push counter instrument
pub trait CounterHandle: Send + Sync {
    /// Add a delta to the accumulated total. Must be safe to call from
    /// many threads concurrently without losing updates.
    fn add(&self, delta: f64);
}

/// Read-only accessor the backend invokes at scrape time to sample a
/// pull gauge. Safe to call concurrently with writers.
pub type GaugeSampler = Box<dyn Fn() -> f64 + Send + Sync>;

/// Factory for exported instruments
pub trait MetricBackend: Send + Sync {
    /// Create a counter instrument with the given exported name.
    /// Unit and description are fixed for the instrument's lifetime.
    fn create_counter(&self, name: &str, unit: &str, description: &str) -> Arc<dyn CounterHandle>;

    /// Register a pull gauge. The backend calls `sampler` on its own
    /// schedule for as long as the process lives; there is no
    /// unregistration.
    fn register_gauge(&self, name: &str, unit: &str, description: &str, sampler: GaugeSampler);

    /// Short backend identifier for logs
    fn backend_name(&self) -> &'static str;
}
