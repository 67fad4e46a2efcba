//! Top-level tracker configuration loaded from TOML.
//!
//! ```toml
//! [registry]
//! address = "0x00000000000000000000000000000000000000aa"
//! admin = "0x00000000000000000000000000000000000000bb"
//! fee_bps = 0
//!
//! [metrics]
//! base_feed = "0x00000000000000000000000000000000000000cc"
//! roi_scale = 1000000000000000000
//! quote_unit = 1
//! max_price_age_secs = 3600
//! ```

use std::path::Path;

use serde::Deserialize;

use super::{MetricsConfig, RegistryConfig};
use crate::error::TrackerError;

/// Everything needed to stand up an [`Exchange`](crate::exchange::Exchange).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrackerConfig {
    registry: RegistryConfig,
    metrics: MetricsConfig,
}

impl TrackerConfig {
    /// Creates a new `TrackerConfig` from validated parts.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::InvalidConfiguration`] if either part fails
    /// validation.
    pub fn new(registry: RegistryConfig, metrics: MetricsConfig) -> Result<Self, TrackerError> {
        let config = Self { registry, metrics };
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::InvalidConfiguration`] on malformed TOML or
    /// on a failed validation.
    pub fn from_toml_str(source: &str) -> Result<Self, TrackerError> {
        let config: Self = toml::from_str(source)
            .map_err(|e| TrackerError::InvalidConfiguration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::InvalidConfiguration`] if the file cannot be
    /// read or its contents are invalid.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TrackerError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| {
            TrackerError::InvalidConfiguration(format!("{}: {e}", path.display()))
        })?;
        Self::from_toml_str(&source)
    }

    /// Validates both sections.
    ///
    /// # Errors
    ///
    /// Returns the first section error.
    pub fn validate(&self) -> Result<(), TrackerError> {
        self.registry.validate()?;
        self.metrics.validate()
    }

    /// Returns the registry section.
    #[must_use]
    pub const fn registry(&self) -> &RegistryConfig {
        &self.registry
    }

    /// Returns the metrics section.
    #[must_use]
    pub const fn metrics(&self) -> &MetricsConfig {
        &self.metrics
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{Address, Amount};

    const FULL: &str = r#"
[registry]
address = "0x00000000000000000000000000000000000000aa"
admin = "0x00000000000000000000000000000000000000bb"
fee_bps = 30

[metrics]
base_feed = "0x00000000000000000000000000000000000000cc"
roi_scale = 1000
quote_unit = 10
max_price_age_secs = 3600
"#;

    #[test]
    fn parses_full_document() {
        let Ok(cfg) = TrackerConfig::from_toml_str(FULL) else {
            panic!("expected valid config");
        };
        let Ok(admin) = "0x00000000000000000000000000000000000000bb".parse::<Address>() else {
            panic!("valid address");
        };
        assert_eq!(cfg.registry().admin(), admin);
        assert_eq!(cfg.registry().fee_tier().basis_points(), 30);
        assert_eq!(cfg.metrics().roi_scale(), Amount::new(1_000));
        assert_eq!(cfg.metrics().quote_unit(), Amount::new(10));
        assert_eq!(cfg.metrics().max_price_age_secs(), Some(3_600));
    }

    #[test]
    fn optional_keys_default() {
        let src = r#"
[registry]
address = "0x00000000000000000000000000000000000000aa"
admin = "0x00000000000000000000000000000000000000bb"

[metrics]
base_feed = "0x00000000000000000000000000000000000000cc"
"#;
        let Ok(cfg) = TrackerConfig::from_toml_str(src) else {
            panic!("expected valid config");
        };
        assert!(cfg.registry().fee_tier().is_zero());
        assert_eq!(cfg.metrics().quote_unit(), Amount::ONE);
        assert_eq!(cfg.metrics().max_price_age_secs(), None);
    }

    #[test]
    fn fee_above_denominator_rejected() {
        let src = FULL.replace("fee_bps = 30", "fee_bps = 10001");
        assert!(matches!(
            TrackerConfig::from_toml_str(&src),
            Err(TrackerError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn malformed_address_rejected() {
        let src = FULL.replace("0x00000000000000000000000000000000000000aa", "0xzz");
        assert!(TrackerConfig::from_toml_str(&src).is_err());
    }

    #[test]
    fn unknown_key_rejected() {
        let src = format!("{FULL}\n[extra]\nkey = 1\n");
        assert!(TrackerConfig::from_toml_str(&src).is_err());
    }

    #[test]
    fn missing_file_is_configuration_error() {
        let result = TrackerConfig::from_file("/nonexistent/tracker.toml");
        assert!(matches!(
            result,
            Err(TrackerError::InvalidConfiguration(_))
        ));
    }
}
