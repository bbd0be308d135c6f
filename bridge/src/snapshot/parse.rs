//! Fail-closed snapshot decoding
//!
//! The raw payload comes from a subsystem this crate does not control
//! and is frequently malformed. Every defect yields `None`, never an
//! error: one bad sample must not interrupt the stream of good ones.

use serde_json::{Map, Value as JsonValue};

use super::types::{ParsedUpdate, SnapshotPayload};
use crate::core::constants::{
    FIELD_COUNTER_TYPE, FIELD_DISPLAY_NAME, FIELD_DISPLAY_UNIT, FIELD_INCREMENT,
    FIELD_INTERVAL_SEC, FIELD_MEAN, FIELD_NAME, RATE_SUFFIX,
};

/// Decode one raw counter snapshot into a typed update.
///
/// Requirements for any outcome: the payload is a JSON object and
/// `Name` is a non-empty string. `DisplayName` and `DisplayUnit`
/// default to `""` when absent or of the wrong type.
pub fn parse(source: &str, raw: &JsonValue) -> Option<ParsedUpdate> {
    let fields = raw.as_object()?;

    let name = fields
        .get(FIELD_NAME)
        .and_then(JsonValue::as_str)
        .filter(|s| !s.is_empty())?;

    let payload = select_payload(name, fields)?;

    Some(ParsedUpdate {
        source: source.to_string(),
        name: name.to_string(),
        display_name: string_or_default(fields, FIELD_DISPLAY_NAME),
        display_unit: string_or_default(fields, FIELD_DISPLAY_UNIT),
        counter_type: fields
            .get(FIELD_COUNTER_TYPE)
            .and_then(JsonValue::as_str)
            .map(str::to_owned),
        payload,
    })
}

/// Pick exactly one payload shape. Order is significant: a rate counter
/// also carries `Increment`, so the name-suffix check must run first or
/// rates would be misread as plain cumulative counters.
///
/// There is deliberately no fall-through: once a branch is selected, a
/// missing or non-numeric required field drops the whole snapshot.
fn select_payload(name: &str, fields: &Map<String, JsonValue>) -> Option<SnapshotPayload> {
    if name.ends_with(RATE_SUFFIX) {
        let increment = fields.get(FIELD_INCREMENT).and_then(JsonValue::as_f64)?;
        let interval_sec = fields.get(FIELD_INTERVAL_SEC).and_then(JsonValue::as_f64)?;
        return Some(SnapshotPayload::Rate {
            increment,
            interval_sec,
        });
    }

    if let Some(value) = fields.get(FIELD_INCREMENT) {
        return value
            .as_f64()
            .map(|increment| SnapshotPayload::Delta { increment });
    }

    if let Some(value) = fields.get(FIELD_MEAN) {
        return value.as_f64().map(|mean| SnapshotPayload::Mean { mean });
    }

    None
}

fn string_or_default(fields: &Map<String, JsonValue>, key: &str) -> String {
    fields
        .get(key)
        .and_then(JsonValue::as_str)
        .unwrap_or_default()
        .to_string()
}
