//! Construction from a validated configuration blueprint.
//!
//! [`FromConfig`] gives the registry and the metrics engine a uniform
//! constructor from their [`config`](crate::config) structs. The
//! [`Exchange`](crate::exchange::Exchange) builds both through it.
//!
//! # Validation Contract
//!
//! Implementations **must** call the config's `validate()` before using
//! it. A successfully constructed component is guaranteed to start from a
//! valid state, even when the config was deserialized rather than built
//! through its checked constructor.
//!
//! # No Generic Blanket Implementation
//!
//! Every component-config pairing is an explicit impl.

use crate::error::TrackerError;

/// Builds a component from its configuration.
///
/// # Implementors
///
/// - `impl FromConfig<RegistryConfig> for PoolRegistry`
/// - `impl FromConfig<MetricsConfig> for MetricsEngine`
///
/// # Errors
///
/// Returns [`TrackerError::InvalidConfiguration`] if the configuration is
/// invalid.
pub trait FromConfig<C> {
    /// Creates a new instance from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::InvalidConfiguration`] if any parameter is
    /// out of range or inconsistent.
    fn from_config(config: &C) -> Result<Self, TrackerError>
    where
        Self: Sized;
}
