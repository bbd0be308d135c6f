//! Metric identity

use std::fmt;

/// Unique key for a metric stream: the `(source, counter)` pair.
///
/// Identity is immutable once an instrument exists for it. The counter
/// and gauge registries key on the same type but are separate
/// namespaces; equal identities on the two sides never collide.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MetricIdentity {
    /// Name of the observed event source
    pub source: String,
    /// Counter name within the source
    pub counter: String,
}

impl MetricIdentity {
    pub fn new(source: impl Into<String>, counter: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            counter: counter.into(),
        }
    }

    /// Deterministic exported instrument name under the given namespace.
    ///
    /// The same identity always resolves to the same name for the
    /// process lifetime, keeping the exporter's name space stable.
    pub fn instrument_name(&self, namespace: &str) -> String {
        format!("{namespace}-{}-{}", self.source, self.counter)
    }
}

impl fmt::Display for MetricIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.source, self.counter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_instrument_name_is_deterministic() {
        let identity = MetricIdentity::new("my-runtime", "requests");
        assert_eq!(
            identity.instrument_name("runtime-counters"),
            "runtime-counters-my-runtime-requests"
        );
        assert_eq!(
            identity.instrument_name("runtime-counters"),
            identity.instrument_name("runtime-counters")
        );
    }

    #[test]
    fn test_identity_as_map_key() {
        let mut map = HashMap::new();
        map.insert(MetricIdentity::new("a", "x"), 1);
        map.insert(MetricIdentity::new("b", "x"), 2);
        map.insert(MetricIdentity::new("a", "y"), 3);

        assert_eq!(map.len(), 3);
        assert_eq!(map[&MetricIdentity::new("a", "x")], 1);
    }

    #[test]
    fn test_display() {
        let identity = MetricIdentity::new("rt", "cpu-usage");
        assert_eq!(identity.to_string(), "rt/cpu-usage");
    }
}
