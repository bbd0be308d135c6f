// =============================================================================
// Meter Names
// =============================================================================

/// Meter that owns all push counter instruments
pub const COUNTER_METER_NAME: &str = "counter-bridge.counters";

/// Meter that owns all pull gauge instruments
pub const GAUGE_METER_NAME: &str = "counter-bridge.gauges";

// =============================================================================
// Instrument Namespaces
// =============================================================================

/// Default namespace prefix for counter instrument names
pub const DEFAULT_COUNTER_NAMESPACE: &str = "runtime-counters";

/// Default namespace prefix for gauge instrument names
pub const DEFAULT_GAUGE_NAMESPACE: &str = "runtime-gauges";

// =============================================================================
// Snapshot Fields
// =============================================================================

/// Counter name (required, non-empty string)
pub const FIELD_NAME: &str = "Name";

/// Human-readable description (optional string)
pub const FIELD_DISPLAY_NAME: &str = "DisplayName";

/// Unit string (optional)
pub const FIELD_DISPLAY_UNIT: &str = "DisplayUnit";

/// Reported counter type label (informational only, never branched on)
pub const FIELD_COUNTER_TYPE: &str = "CounterType";

/// Delta since the previous reporting interval
pub const FIELD_INCREMENT: &str = "Increment";

/// Length of the reporting interval in seconds
pub const FIELD_INTERVAL_SEC: &str = "IntervalSec";

/// Mean of the samples observed during the interval
pub const FIELD_MEAN: &str = "Mean";

/// Counters whose name carries this suffix publish a per-second rate
pub const RATE_SUFFIX: &str = "per-second";

// =============================================================================
// Environment Variables
// =============================================================================

/// Environment variable for the snapshot topic channel capacity
pub const ENV_TOPIC_CAPACITY: &str = "COUNTER_BRIDGE_TOPIC_CAPACITY";

// =============================================================================
// Defaults
// =============================================================================

/// Default snapshot topic channel capacity (messages)
pub const DEFAULT_TOPIC_CAPACITY: usize = 1024;

/// How long to wait for all registered tasks during shutdown
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 5;

/// Per-message receive timeout while draining a topic during shutdown
pub const DRAIN_RECV_TIMEOUT_MS: u64 = 100;
