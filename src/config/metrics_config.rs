//! Configuration for the metrics engine.

use serde::Deserialize;

use crate::domain::{Address, Amount};
use crate::error::TrackerError;

const fn default_roi_scale() -> u64 {
    1_000_000_000_000_000_000
}

const fn default_quote_unit() -> u64 {
    1
}

/// Parameters of the [`MetricsEngine`](crate::metrics::MetricsEngine).
///
/// # Fields
///
/// | TOML key | Meaning | Default |
/// |----------|---------|---------|
/// | `base_feed` | price feed of the base currency used by the ROI metrics | required |
/// | `roi_scale` | fixed-point factor `daily_roi` multiplies by | `10^18` |
/// | `quote_unit` | amount of a token quoted through a pool when routing | `1` |
/// | `max_price_age_secs` | reject feed answers older than this | unset |
///
/// `quote_unit` trades precision for fidelity: with the default of one raw
/// unit, tokens priced below one unit of their routing token quote to zero.
/// Setting it to the token's `10^decimals` values them precisely.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsConfig {
    base_feed: Address,
    #[serde(default = "default_roi_scale")]
    roi_scale: u64,
    #[serde(default = "default_quote_unit")]
    quote_unit: u64,
    #[serde(default)]
    max_price_age_secs: Option<u64>,
}

impl MetricsConfig {
    /// Creates a config with the default scale, quote unit and no staleness
    /// limit.
    #[must_use]
    pub const fn with_defaults(base_feed: Address) -> Self {
        Self {
            base_feed,
            roi_scale: default_roi_scale(),
            quote_unit: default_quote_unit(),
            max_price_age_secs: None,
        }
    }

    /// Creates a new `MetricsConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::InvalidConfiguration`] if `roi_scale` or
    /// `quote_unit` is zero.
    pub fn new(
        base_feed: Address,
        roi_scale: u64,
        quote_unit: u64,
        max_price_age_secs: Option<u64>,
    ) -> Result<Self, TrackerError> {
        let config = Self {
            base_feed,
            roi_scale,
            quote_unit,
            max_price_age_secs,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::InvalidConfiguration`] if `roi_scale` or
    /// `quote_unit` is zero.
    pub fn validate(&self) -> Result<(), TrackerError> {
        if self.roi_scale == 0 {
            return Err(TrackerError::InvalidConfiguration(
                "roi_scale must be non-zero".to_owned(),
            ));
        }
        if self.quote_unit == 0 {
            return Err(TrackerError::InvalidConfiguration(
                "quote_unit must be non-zero".to_owned(),
            ));
        }
        Ok(())
    }

    /// Returns the base-currency feed.
    #[must_use]
    pub const fn base_feed(&self) -> Address {
        self.base_feed
    }

    /// Returns the daily-ROI scaling factor.
    #[must_use]
    pub const fn roi_scale(&self) -> Amount {
        Amount::new(self.roi_scale as u128)
    }

    /// Returns the routing quote unit.
    #[must_use]
    pub const fn quote_unit(&self) -> Amount {
        Amount::new(self.quote_unit as u128)
    }

    /// Returns the maximum accepted price age, if any.
    #[must_use]
    pub const fn max_price_age_secs(&self) -> Option<u64> {
        self.max_price_age_secs
    }
}
