//! In-memory implementations of the collaborator traits.
//!
//! | Adapter | Trait |
//! |---------|-------|
//! | [`InMemoryLedger`] | [`AssetLedger`](crate::traits::AssetLedger) |
//! | [`StaticPriceFeeds`] | [`PriceFeeds`](crate::traits::PriceFeeds) |
//! | [`SystemClock`], [`ManualClock`] | [`Clock`](crate::traits::Clock) |
//!
//! They back the tests and the demo, and are enough to run the tracker as
//! a self-contained simulation.

mod clock;
mod in_memory_ledger;
mod static_price_feeds;

pub use clock::{ManualClock, SystemClock};
pub use in_memory_ledger::InMemoryLedger;
pub use static_price_feeds::StaticPriceFeeds;
