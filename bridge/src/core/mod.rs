//! Core infrastructure: configuration, constants, shutdown

pub mod config;
pub mod constants;
pub mod shutdown;

pub use config::{AdapterConfig, ConfigError, SourceFilter, TopicConfig};
pub use shutdown::ShutdownService;
