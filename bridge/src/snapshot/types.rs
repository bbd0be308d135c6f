//! Snapshot data model
//!
//! `SnapshotDelivery` is the raw, untyped payload as it arrives from
//! the subscription collaborator. Everything downstream of the parser
//! works with the strongly-typed `ParsedUpdate`; untyped field access
//! never leaks past the parse boundary.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::registry::MetricIdentity;
use crate::topics::TopicMessage;

/// One raw counter snapshot, tagged with the source that emitted it
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SnapshotDelivery {
    /// Name of the observed event source
    pub source: String,
    /// Untyped field mapping as reported by the instrumented process
    pub payload: JsonValue,
}

impl SnapshotDelivery {
    pub fn new(source: impl Into<String>, payload: JsonValue) -> Self {
        Self {
            source: source.into(),
            payload,
        }
    }
}

impl TopicMessage for SnapshotDelivery {
    fn size_bytes(&self) -> usize {
        std::mem::size_of::<Self>() + self.source.len() + estimate_json_size(&self.payload)
    }
}

/// Rough in-memory size of a JSON value, for topic capacity accounting
fn estimate_json_size(value: &JsonValue) -> usize {
    match value {
        JsonValue::Null | JsonValue::Bool(_) => 1,
        JsonValue::Number(_) => 8,
        JsonValue::String(s) => s.len(),
        JsonValue::Array(items) => items.iter().map(estimate_json_size).sum::<usize>() + 8,
        JsonValue::Object(map) => {
            map.iter()
                .map(|(k, v)| k.len() + estimate_json_size(v))
                .sum::<usize>()
                + 16
        }
    }
}

/// Validated projection of one raw snapshot
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedUpdate {
    /// Name of the observed event source
    pub source: String,
    /// Counter name within the source
    pub name: String,
    /// Human-readable description, `""` when the snapshot carried none
    pub display_name: String,
    /// Unit string, `""` when the snapshot carried none
    pub display_unit: String,
    /// Reported counter type label. Informational only: classification
    /// relies on the name suffix and field presence instead, which has
    /// proven more reliable than this label.
    pub counter_type: Option<String>,
    /// Exactly one of the three recognized payload shapes
    pub payload: SnapshotPayload,
}

impl ParsedUpdate {
    /// Metric identity of this update
    pub fn identity(&self) -> MetricIdentity {
        MetricIdentity::new(self.source.clone(), self.name.clone())
    }
}

/// The three recognized snapshot payload shapes
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SnapshotPayload {
    /// Counter named `*per-second`: increment over a reporting interval
    Rate { increment: f64, interval_sec: f64 },
    /// Incrementing counter: a delta to add, not an absolute value
    Delta { increment: f64 },
    /// Averaging counter: an absolute value replacing any prior one
    Mean { mean: f64 },
}

/// Which instrument an update publishes to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateKind {
    /// Pull gauge carrying a computed per-second rate
    RateGauge,
    /// Push counter accumulating deltas
    CumulativeCounter,
    /// Pull gauge carrying the latest mean sample
    MeanGauge,
}
