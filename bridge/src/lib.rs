//! counter-bridge
//!
//! Ingests a stream of loosely-typed runtime counter snapshots and
//! republishes them as strongly-typed OpenTelemetry instruments.
//!
//! Rate-named counters (`*per-second`) become pull gauges carrying a
//! computed per-second rate, incrementing counters become cumulative
//! push counters, and averaging counters become pull gauges carrying
//! the latest mean. The snapshot payload sits at a trust boundary and
//! is frequently malformed; every defect is absorbed, never raised.
//!
//! ```no_run
//! use std::sync::Arc;
//! use counter_bridge::{
//!     AdapterConfig, CounterSnapshotAdapter, SnapshotDelivery, SnapshotPipeline, Topic,
//!     TopicConfig,
//! };
//! use opentelemetry_sdk::metrics::SdkMeterProvider;
//! use serde_json::json;
//! use tokio::sync::watch;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = SdkMeterProvider::builder().build();
//! let adapter = Arc::new(CounterSnapshotAdapter::new(
//!     &provider,
//!     AdapterConfig::default(),
//! )?);
//!
//! let topic = Topic::new(TopicConfig::default())?;
//! let (shutdown_tx, shutdown_rx) = watch::channel(false);
//! let handle = SnapshotPipeline::new(Arc::clone(&adapter)).start(topic.clone(), shutdown_rx);
//!
//! // The subscription collaborator publishes one delivery per counter
//! // per reporting interval.
//! topic.publish(SnapshotDelivery::new(
//!     "my-runtime",
//!     json!({"Name": "requests", "Increment": 7.0}),
//! ))?;
//!
//! shutdown_tx.send(true)?;
//! handle.await?;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod core;
pub mod registry;
pub mod snapshot;
pub mod topics;

pub use crate::adapter::{CounterSnapshotAdapter, SnapshotPipeline, SubscriptionBridge};
pub use crate::core::config::{AdapterConfig, ConfigError, SourceFilter, TopicConfig};
pub use crate::core::shutdown::ShutdownService;
pub use crate::registry::{
    CounterRegistry, GaugeRegistry, MetricBackend, MetricIdentity, OtelMeterBackend,
};
pub use crate::snapshot::{
    ParsedUpdate, SnapshotDelivery, SnapshotPayload, UpdateKind, classify, parse,
};
pub use crate::topics::{Topic, TopicError, TopicMessage};
