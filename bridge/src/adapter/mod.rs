//! Counter snapshot adapter
//!
//! Orchestrates the single-hop dispatch: raw snapshot → parse →
//! classify → the counter or gauge registry. Safe to drive from many
//! producer contexts concurrently; there is no serialization point
//! beyond the registries' own narrow creation sections.

pub mod bridge;
pub mod pipeline;

use std::sync::Arc;

use opentelemetry::metrics::MeterProvider;
use serde_json::Value as JsonValue;

use crate::core::config::{AdapterConfig, ConfigError};
use crate::registry::{
    CounterRegistry, GaugeRegistry, MetricBackend, MetricIdentity, OtelMeterBackend,
};
use crate::snapshot::{SnapshotDelivery, UpdateKind, classify, parse};

pub use bridge::SubscriptionBridge;
pub use pipeline::SnapshotPipeline;

/// Republishes loosely-typed counter snapshots as typed instruments
pub struct CounterSnapshotAdapter {
    config: AdapterConfig,
    counters: CounterRegistry,
    gauges: GaugeRegistry,
}

impl CounterSnapshotAdapter {
    /// Build an adapter publishing through OpenTelemetry meters from
    /// the given provider.
    pub fn new(provider: &dyn MeterProvider, config: AdapterConfig) -> Result<Self, ConfigError> {
        let counter_backend: Arc<dyn MetricBackend> = Arc::new(OtelMeterBackend::counters(provider));
        let gauge_backend: Arc<dyn MetricBackend> = Arc::new(OtelMeterBackend::gauges(provider));
        Self::with_backends(counter_backend, gauge_backend, config)
    }

    /// Build an adapter over explicit metric backends (tests, custom
    /// export pipelines).
    pub fn with_backends(
        counter_backend: Arc<dyn MetricBackend>,
        gauge_backend: Arc<dyn MetricBackend>,
        config: AdapterConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let counters = CounterRegistry::new(counter_backend, config.counter_namespace.clone());
        let gauges = GaugeRegistry::new(gauge_backend, config.gauge_namespace.clone());
        Ok(Self {
            config,
            counters,
            gauges,
        })
    }

    /// Process one raw snapshot delivered for `source`.
    ///
    /// All failure is absorption: malformed, degenerate, or
    /// unclassifiable payloads publish nothing, and the next reporting
    /// interval delivers a fresh snapshot regardless.
    pub fn on_snapshot(&self, source: &str, raw: &JsonValue) {
        let Some(update) = parse(source, raw) else {
            tracing::trace!(source, "skipping malformed counter snapshot");
            return;
        };
        let Some((kind, value)) = classify(&update) else {
            tracing::trace!(source, counter = %update.name, "skipping unclassifiable snapshot");
            return;
        };

        let identity = update.identity();
        match kind {
            UpdateKind::CumulativeCounter => {
                if self.config.counters_enabled {
                    self.counters.add_value(
                        &identity,
                        &update.display_unit,
                        &update.display_name,
                        value,
                    );
                }
            }
            UpdateKind::RateGauge | UpdateKind::MeanGauge => {
                if self.config.gauges_enabled {
                    self.gauges.set_value(
                        &identity,
                        &update.display_unit,
                        &update.display_name,
                        value,
                    );
                }
            }
        }
    }

    /// Process one tagged delivery
    pub fn on_delivery(&self, delivery: &SnapshotDelivery) {
        self.on_snapshot(&delivery.source, &delivery.payload);
    }

    /// Whether the configured source filter admits `source`
    pub fn source_allowed(&self, source: &str) -> bool {
        (self.config.source_filter)(source)
    }

    /// Current value of a gauge, `0.0` for an unknown identity
    pub fn sample_gauge(&self, identity: &MetricIdentity) -> f64 {
        self.gauges.sample(identity)
    }

    pub fn counters(&self) -> &CounterRegistry {
        &self.counters
    }

    pub fn gauges(&self) -> &GaugeRegistry {
        &self.gauges
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::backend::testing::RecordingBackend;
    use serde_json::json;

    fn adapter_with(
        backend: &Arc<RecordingBackend>,
        config: AdapterConfig,
    ) -> CounterSnapshotAdapter {
        let counter_backend: Arc<dyn MetricBackend> = backend.clone();
        let gauge_backend: Arc<dyn MetricBackend> = backend.clone();
        CounterSnapshotAdapter::with_backends(counter_backend, gauge_backend, config).unwrap()
    }

    fn adapter(backend: &Arc<RecordingBackend>) -> CounterSnapshotAdapter {
        adapter_with(backend, AdapterConfig::default())
    }

    #[test]
    fn test_increment_snapshot_accumulates_counter() {
        let backend = RecordingBackend::new();
        let adapter = adapter(&backend);

        adapter.on_snapshot("rt", &json!({"Name": "requests", "Increment": 7.0}));
        adapter.on_snapshot("rt", &json!({"Name": "requests", "Increment": 3.0}));

        assert_eq!(
            backend.counter_total("runtime-counters-rt-requests"),
            Some(10.0)
        );
    }

    #[test]
    fn test_rate_snapshot_publishes_gauge() {
        let backend = RecordingBackend::new();
        let adapter = adapter(&backend);

        adapter.on_snapshot(
            "rt",
            &json!({"Name": "requests-per-second", "Increment": 10.0, "IntervalSec": 5.0}),
        );

        let id = MetricIdentity::new("rt", "requests-per-second");
        assert_eq!(adapter.sample_gauge(&id), 2.0);
        assert!(adapter.counters().is_empty());
    }

    #[test]
    fn test_mean_snapshot_overwrites_gauge() {
        let backend = RecordingBackend::new();
        let adapter = adapter(&backend);
        let id = MetricIdentity::new("rt", "cpu-usage");

        adapter.on_snapshot("rt", &json!({"Name": "cpu-usage", "Mean": 42.5}));
        assert_eq!(adapter.sample_gauge(&id), 42.5);

        adapter.on_snapshot("rt", &json!({"Name": "cpu-usage", "Mean": 10.0}));
        assert_eq!(adapter.sample_gauge(&id), 10.0);
    }

    #[test]
    fn test_zero_interval_publishes_nothing() {
        let backend = RecordingBackend::new();
        let adapter = adapter(&backend);

        adapter.on_snapshot(
            "rt",
            &json!({"Name": "requests-per-second", "Increment": 10.0, "IntervalSec": 0.0}),
        );

        assert!(adapter.gauges().is_empty());
        assert!(adapter.counters().is_empty());
    }

    #[test]
    fn test_malformed_snapshot_absorbed() {
        let backend = RecordingBackend::new();
        let adapter = adapter(&backend);

        adapter.on_snapshot("rt", &json!({"Increment": 1.0}));
        adapter.on_snapshot("rt", &json!(null));
        adapter.on_snapshot("rt", &json!({"Name": "orphan"}));

        assert!(adapter.counters().is_empty());
        assert!(adapter.gauges().is_empty());
    }

    #[test]
    fn test_same_name_counter_and_gauge_live_in_separate_namespaces() {
        let backend = RecordingBackend::new();
        let adapter = adapter(&backend);

        // A delta and a mean under the same counter name: one lands in
        // each registry, with distinct exported instrument names.
        adapter.on_snapshot("rt", &json!({"Name": "mixed", "Increment": 5.0}));
        adapter.on_snapshot("rt", &json!({"Name": "mixed", "Mean": 1.5}));

        assert_eq!(backend.counter_total("runtime-counters-rt-mixed"), Some(5.0));
        assert_eq!(backend.scrape_gauge("runtime-gauges-rt-mixed"), Some(1.5));
        assert_eq!(adapter.counters().len(), 1);
        assert_eq!(adapter.gauges().len(), 1);
    }

    #[test]
    fn test_disabled_counters_absorb_updates() {
        let backend = RecordingBackend::new();
        let mut config = AdapterConfig::default();
        config.counters_enabled = false;
        let adapter = adapter_with(&backend, config);

        adapter.on_snapshot("rt", &json!({"Name": "requests", "Increment": 7.0}));
        assert!(adapter.counters().is_empty());
    }

    #[test]
    fn test_disabled_gauges_absorb_updates() {
        let backend = RecordingBackend::new();
        let mut config = AdapterConfig::default();
        config.gauges_enabled = false;
        let adapter = adapter_with(&backend, config);

        adapter.on_snapshot("rt", &json!({"Name": "cpu-usage", "Mean": 42.5}));
        assert!(adapter.gauges().is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let backend = RecordingBackend::new();
        let config = AdapterConfig::default().with_counter_namespace("");
        let counter_backend: Arc<dyn MetricBackend> = backend.clone();
        let gauge_backend: Arc<dyn MetricBackend> = backend.clone();
        let result =
            CounterSnapshotAdapter::with_backends(counter_backend, gauge_backend, config);
        assert!(result.is_err());
    }

    #[test]
    fn test_delivery_dispatch() {
        let backend = RecordingBackend::new();
        let adapter = adapter(&backend);
        let delivery =
            SnapshotDelivery::new("rt", json!({"Name": "requests", "Increment": 2.0}));

        adapter.on_delivery(&delivery);
        assert_eq!(
            backend.counter_total("runtime-counters-rt-requests"),
            Some(2.0)
        );
    }
}
