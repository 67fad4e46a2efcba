//! Routing table entries.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::Address;

/// A `(token, price feed)` anchor of the valuation graph.
///
/// A token with a routing entry is valued directly by its feed; any other
/// token is valued through a pool into a routing token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoutingEntry {
    token: Address,
    price_feed: Address,
}

impl RoutingEntry {
    /// Creates a routing entry.
    #[must_use]
    pub const fn new(token: Address, price_feed: Address) -> Self {
        Self { token, price_feed }
    }

    /// Returns the routed token.
    #[must_use]
    pub const fn token(&self) -> Address {
        self.token
    }

    /// Returns the feed that prices [`token`](Self::token).
    #[must_use]
    pub const fn price_feed(&self) -> Address {
        self.price_feed
    }
}

impl fmt::Display for RoutingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} via {}", self.token, self.price_feed)
    }
}
