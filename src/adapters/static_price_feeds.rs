//! Settable in-memory [`PriceFeeds`].

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::trace;

use crate::domain::{Address, OraclePrice};
use crate::error::TrackerError;
use crate::traits::PriceFeeds;

/// Price feeds whose answers are set by hand.
///
/// Each feed address holds its latest [`OraclePrice`]; [`set`](Self::set)
/// overwrites it. Querying an address that was never set fails with
/// [`TrackerError::UnknownPriceFeed`].
#[derive(Debug, Default)]
pub struct StaticPriceFeeds {
    answers: RwLock<HashMap<Address, OraclePrice>>,
}

impl StaticPriceFeeds {
    /// Creates a set with no feeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes `price` as the latest answer of `feed`.
    pub fn set(&self, feed: Address, price: OraclePrice) {
        trace!(%feed, answer = price.answer(), "price published");
        self.answers.write().insert(feed, price);
    }
}

impl PriceFeeds for StaticPriceFeeds {
    fn latest_price(&self, feed: Address) -> Result<OraclePrice, TrackerError> {
        self.answers
            .read()
            .get(&feed)
            .copied()
            .ok_or(TrackerError::UnknownPriceFeed(feed))
    }
}
