//! Seams to the external collaborators the core consumes.
//!
//! The tracker is the pool registry, the swap engine and the metrics
//! engine. Balances live in an [`AssetLedger`], prices come from
//! [`PriceFeeds`], and time from a [`Clock`]. In-memory implementations of
//! all three live in [`adapters`](crate::adapters).
//!
//! [`FromConfig`] is the uniform constructor of the configurable components.

mod asset_ledger;
mod clock;
mod from_config;
mod price_feeds;

pub use asset_ledger::AssetLedger;
pub use clock::Clock;
pub use from_config::FromConfig;
pub use price_feeds::PriceFeeds;
