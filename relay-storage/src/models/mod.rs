//! Storage models.

mod relay_config;

pub use relay_config::RelayConfig;
