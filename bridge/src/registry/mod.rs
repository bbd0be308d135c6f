//! Dual-sink instrument registries
//!
//! The counter side accumulates pushed deltas; the gauge side stores
//! the latest sample behind a pull callback. Both guarantee
//! at-most-once instrument creation per metric identity and never
//! remove an entry for the process lifetime.

pub mod backend;
pub mod counter;
pub mod gauge;
pub mod identity;
pub mod otel;

pub use backend::{CounterHandle, GaugeSampler, MetricBackend};
pub use counter::CounterRegistry;
pub use gauge::{GaugeCell, GaugeRegistry};
pub use identity::MetricIdentity;
pub use otel::OtelMeterBackend;
