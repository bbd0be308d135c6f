//! OpenTelemetry metric backend
//!
//! Publishes instruments through an OpenTelemetry `Meter`. Counters map
//! onto `Counter<f64>`; gauges onto `ObservableGauge<f64>` whose
//! callback reads the registry's cell at scrape time, on the SDK's own
//! schedule.

use std::sync::Arc;

use opentelemetry::metrics::{Counter, Meter, MeterProvider};

use super::backend::{CounterHandle, GaugeSampler, MetricBackend};
use crate::core::constants::{COUNTER_METER_NAME, GAUGE_METER_NAME};

/// Backend over a single OpenTelemetry meter
pub struct OtelMeterBackend {
    meter: Meter,
    name: &'static str,
}

impl OtelMeterBackend {
    pub fn new(meter: Meter, name: &'static str) -> Self {
        Self { meter, name }
    }

    /// Backend for the counter-side registry
    pub fn counters(provider: &dyn MeterProvider) -> Self {
        Self::new(provider.meter(COUNTER_METER_NAME), "otel-counters")
    }

    /// Backend for the gauge-side registry
    pub fn gauges(provider: &dyn MeterProvider) -> Self {
        Self::new(provider.meter(GAUGE_METER_NAME), "otel-gauges")
    }
}

struct OtelCounter(Counter<f64>);

impl CounterHandle for OtelCounter {
    fn add(&self, delta: f64) {
        self.0.add(delta, &[]);
    }
}

impl MetricBackend for OtelMeterBackend {
    fn create_counter(&self, name: &str, unit: &str, description: &str) -> Arc<dyn CounterHandle> {
        let mut builder = self.meter.f64_counter(name.to_string());
        if !unit.is_empty() {
            builder = builder.with_unit(unit.to_string());
        }
        if !description.is_empty() {
            builder = builder.with_description(description.to_string());
        }
        Arc::new(OtelCounter(builder.build()))
    }

    fn register_gauge(&self, name: &str, unit: &str, description: &str, sampler: GaugeSampler) {
        let mut builder = self
            .meter
            .f64_observable_gauge(name.to_string())
            .with_callback(move |observer| observer.observe(sampler(), &[]));
        if !unit.is_empty() {
            builder = builder.with_unit(unit.to_string());
        }
        if !description.is_empty() {
            builder = builder.with_description(description.to_string());
        }
        // The callback stays registered with the meter provider for the
        // process lifetime; the returned handle carries no extra state.
        let _gauge = builder.build();
    }

    fn backend_name(&self) -> &'static str {
        self.name
    }
}
