//! Fixed-point answer reported by a price feed.

use super::{Amount, Timestamp};
use crate::error::TrackerError;

/// The latest answer of a price feed.
///
/// `answer` is a signed fixed-point integer scaled by `10^decimals`, the
/// convention of aggregator-style oracles. The tracker multiplies raw
/// answers into its valuations without rescaling, so every metric is
/// expressed in the feed's fixed-point units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OraclePrice {
    answer: i128,
    decimals: u8,
    updated_at: Timestamp,
}

impl OraclePrice {
    /// Creates a price answer.
    #[must_use]
    pub const fn new(answer: i128, decimals: u8, updated_at: Timestamp) -> Self {
        Self {
            answer,
            decimals,
            updated_at,
        }
    }

    /// Returns the raw signed answer.
    #[must_use]
    pub const fn answer(&self) -> i128 {
        self.answer
    }

    /// Returns the number of decimals the answer is scaled by.
    #[must_use]
    pub const fn decimals(&self) -> u8 {
        self.decimals
    }

    /// Returns when the answer was last updated.
    #[must_use]
    pub const fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Returns the answer as an unsigned amount.
    ///
    /// A zero answer is allowed and values everything at zero.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::InvalidPrice`] for a negative answer.
    pub const fn value(&self) -> Result<Amount, TrackerError> {
        if self.answer < 0 {
            return Err(TrackerError::InvalidPrice("oracle answer is negative"));
        }
        Ok(Amount::new(self.answer as u128))
    }
}
