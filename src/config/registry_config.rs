//! Configuration for the pool registry.

use serde::Deserialize;

use crate::domain::{Address, FeeTier, BPS_DENOMINATOR};
use crate::error::TrackerError;

/// Immutable parameters of a [`PoolRegistry`](crate::registry::PoolRegistry).
///
/// # Fields
///
/// | TOML key | Meaning | Default |
/// |----------|---------|---------|
/// | `address` | the registry's own address; pools hold funds under derived addresses | required |
/// | `admin` | the only caller allowed to add routing entries | required |
/// | `fee_bps` | swap fee of every pool the registry creates | `0` |
///
/// # Validation
///
/// - `fee_bps` must be at most 10 000.
/// - `address` must be non-zero and differ from `admin`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    address: Address,
    admin: Address,
    #[serde(default, rename = "fee_bps")]
    fee_tier: FeeTier,
}

impl RegistryConfig {
    /// Creates a new `RegistryConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::InvalidConfiguration`] if validation fails.
    pub fn new(address: Address, admin: Address, fee_tier: FeeTier) -> Result<Self, TrackerError> {
        let config = Self {
            address,
            admin,
            fee_tier,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::InvalidConfiguration`] describing the first
    /// violated invariant.
    pub fn validate(&self) -> Result<(), TrackerError> {
        if self.fee_tier.basis_points() > BPS_DENOMINATOR {
            return Err(TrackerError::InvalidConfiguration(format!(
                "fee_bps {} exceeds {BPS_DENOMINATOR}",
                self.fee_tier.basis_points()
            )));
        }
        if self.address.is_zero() {
            return Err(TrackerError::InvalidConfiguration(
                "registry address must be non-zero".to_owned(),
            ));
        }
        if self.address == self.admin {
            return Err(TrackerError::InvalidConfiguration(
                "registry address and admin must differ".to_owned(),
            ));
        }
        Ok(())
    }

    /// Returns the registry's own address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Returns the administrative owner.
    #[must_use]
    pub const fn admin(&self) -> Address {
        self.admin
    }

    /// Returns the fee tier applied to new pools.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }
}
