//! Validated configuration blueprints.
//!
//! [`TrackerConfig`] is the top-level document, loaded from TOML. It holds a
//! [`RegistryConfig`] and a [`MetricsConfig`]; every struct validates its
//! invariants on construction and after deserialization.

mod metrics_config;
mod registry_config;
mod tracker_config;

pub use metrics_config::MetricsConfig;
pub use registry_config::RegistryConfig;
pub use tracker_config::TrackerConfig;
