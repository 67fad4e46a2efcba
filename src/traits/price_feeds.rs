//! Price oracle seam.

use crate::domain::{Address, OraclePrice};
use crate::error::TrackerError;

/// Source of latest prices, keyed by feed address.
///
/// Routing entries in the registry pair an asset with a feed address; the
/// metrics engine resolves that address through this trait.
pub trait PriceFeeds: Send + Sync {
    /// Returns the latest answer of `feed`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::UnknownPriceFeed`] if no feed is registered
    /// under `feed`.
    fn latest_price(&self, feed: Address) -> Result<OraclePrice, TrackerError>;
}
