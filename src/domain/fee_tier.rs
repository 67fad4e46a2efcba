//! Swap fee expressed in basis points.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, Rounding};
use crate::error::TrackerError;

/// Basis-point denominator (10 000 bp = 100%).
pub const BPS_DENOMINATOR: u32 = 10_000;

/// The fee a pool deducts from every swap input, in basis points.
///
/// The default is zero: the tracker charges nothing unless a fee is
/// configured explicitly. Values above 10 000 bp are rejected by
/// [`FeeTier::new`].
///
/// # Examples
///
/// ```
/// use hydra_tracker::domain::{Amount, FeeTier, Rounding};
///
/// let tier = FeeTier::new(30).expect("valid");
/// assert_eq!(tier.apply(Amount::new(10_000), Rounding::Up).expect("fits"), Amount::new(30));
/// assert!(FeeTier::ZERO.is_zero());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct FeeTier(u32);

impl FeeTier {
    /// No fee.
    pub const ZERO: Self = Self(0);

    /// 0.30%, the common volatile-pair tier.
    pub const TIER_0_30_PERCENT: Self = Self(30);

    /// Creates a fee tier.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::InvalidFee`] above 10 000 bp.
    pub const fn new(basis_points: u32) -> Result<Self, TrackerError> {
        if basis_points > BPS_DENOMINATOR {
            return Err(TrackerError::InvalidFee("fee must be within 0..=10000 bp"));
        }
        Ok(Self(basis_points))
    }

    /// Returns the fee in basis points.
    #[must_use]
    pub const fn basis_points(&self) -> u32 {
        self.0
    }

    /// Returns `true` when no fee is charged.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Computes `amount × bps / 10 000` with explicit rounding.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Overflow`] if the intermediate product overflows.
    pub const fn apply(
        &self,
        amount: Amount,
        rounding: Rounding,
    ) -> Result<Amount, TrackerError> {
        let Some(product) = amount.get().checked_mul(self.0 as u128) else {
            return Err(TrackerError::Overflow("fee product overflow"));
        };
        let divisor = BPS_DENOMINATOR as u128;
        let q = product / divisor;
        if rounding.is_up() && product % divisor != 0 {
            return Ok(Amount::new(q + 1));
        }
        Ok(Amount::new(q))
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}
