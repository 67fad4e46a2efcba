//! Events recorded by the registry for every committed change.

use serde::{Deserialize, Serialize};

use crate::domain::Address;

/// A committed registry change, in commit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryEvent {
    /// A pool was created and seeded.
    PoolCreated {
        /// Address of the new pool.
        pool: Address,
        /// First asset, as passed by the creator.
        asset_one: Address,
        /// Second asset, as passed by the creator.
        asset_two: Address,
        /// Account that created and seeded the pool.
        creator: Address,
    },
    /// A routing entry was appended.
    RoutingAddressAdded {
        /// The routed token.
        token: Address,
        /// Its price feed.
        price_feed: Address,
    },
}
