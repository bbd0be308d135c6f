//! Adapter and topic configuration

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use super::constants::{
    DEFAULT_COUNTER_NAMESPACE, DEFAULT_GAUGE_NAMESPACE, DEFAULT_TOPIC_CAPACITY, ENV_TOPIC_CAPACITY,
};

/// Error type for configuration validation
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("instrument namespace for the {0} registry must not be empty")]
    EmptyNamespace(&'static str),

    #[error("topic channel capacity must be non-zero")]
    ZeroCapacity,
}

/// Predicate deciding which event sources the adapter observes.
///
/// Receives the source name; returning `false` drops every snapshot and
/// announcement from that source.
pub type SourceFilter = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Configuration for [`CounterSnapshotAdapter`](crate::adapter::CounterSnapshotAdapter)
#[derive(Clone)]
pub struct AdapterConfig {
    /// Namespace prefix for counter instrument names
    pub counter_namespace: String,
    /// Namespace prefix for gauge instrument names
    pub gauge_namespace: String,
    /// When false, cumulative counter updates are absorbed without
    /// creating or touching any instrument
    pub counters_enabled: bool,
    /// When false, rate and mean gauge updates are absorbed
    pub gauges_enabled: bool,
    /// Source filter predicate (default: observe everything)
    pub source_filter: SourceFilter,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            counter_namespace: DEFAULT_COUNTER_NAMESPACE.to_string(),
            gauge_namespace: DEFAULT_GAUGE_NAMESPACE.to_string(),
            counters_enabled: true,
            gauges_enabled: true,
            source_filter: Arc::new(|_| true),
        }
    }
}

impl fmt::Debug for AdapterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterConfig")
            .field("counter_namespace", &self.counter_namespace)
            .field("gauge_namespace", &self.gauge_namespace)
            .field("counters_enabled", &self.counters_enabled)
            .field("gauges_enabled", &self.gauges_enabled)
            .field("source_filter", &"<predicate>")
            .finish()
    }
}

impl AdapterConfig {
    /// Replace the source filter predicate
    pub fn with_source_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.source_filter = Arc::new(filter);
        self
    }

    /// Override the counter instrument namespace
    pub fn with_counter_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.counter_namespace = namespace.into();
        self
    }

    /// Override the gauge instrument namespace
    pub fn with_gauge_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.gauge_namespace = namespace.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.counter_namespace.is_empty() {
            return Err(ConfigError::EmptyNamespace("counter"));
        }
        if self.gauge_namespace.is_empty() {
            return Err(ConfigError::EmptyNamespace("gauge"));
        }
        Ok(())
    }
}

/// Snapshot topic configuration
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct TopicConfig {
    /// Broadcast channel capacity in messages
    pub channel_capacity: usize,
}

impl Default for TopicConfig {
    fn default() -> Self {
        let channel_capacity = std::env::var(ENV_TOPIC_CAPACITY)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TOPIC_CAPACITY);

        Self { channel_capacity }
    }
}

impl TopicConfig {
    pub fn with_capacity(channel_capacity: usize) -> Self {
        Self { channel_capacity }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channel_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AdapterConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.counter_namespace, DEFAULT_COUNTER_NAMESPACE);
        assert_eq!(config.gauge_namespace, DEFAULT_GAUGE_NAMESPACE);
        assert!(config.counters_enabled);
        assert!(config.gauges_enabled);
        assert!((config.source_filter)("any-source"));
    }

    #[test]
    fn test_empty_counter_namespace_rejected() {
        let config = AdapterConfig::default().with_counter_namespace("");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("counter"));
    }

    #[test]
    fn test_empty_gauge_namespace_rejected() {
        let config = AdapterConfig::default().with_gauge_namespace("");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("gauge"));
    }

    #[test]
    fn test_source_filter_override() {
        let config = AdapterConfig::default().with_source_filter(|name| name == "my-runtime");
        assert!((config.source_filter)("my-runtime"));
        assert!(!(config.source_filter)("other"));
    }

    #[test]
    fn test_topic_config_zero_capacity_rejected() {
        let config = TopicConfig::with_capacity(0);
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::ZeroCapacity
        ));
    }

    #[test]
    fn test_topic_config_deserialize() {
        let config: TopicConfig = serde_json::from_str(r#"{"channel_capacity": 16}"#).unwrap();
        assert_eq!(config.channel_capacity, 16);
    }

    #[test]
    fn test_topic_config_env_override() {
        // Serialized with a dedicated env var name; no other test touches it.
        unsafe { std::env::set_var(ENV_TOPIC_CAPACITY, "77") };
        let config = TopicConfig::default();
        unsafe { std::env::remove_var(ENV_TOPIC_CAPACITY) };
        assert_eq!(config.channel_capacity, 77);
    }
}
