//! # Hydra Tracker
//!
//! Backend of a small decentralized exchange: a registry of two-asset
//! constant-product pools, the swap and liquidity engine behind each pool,
//! and read-only market metrics valued through price feeds.
//!
//! Token balances, price oracles and the wall clock are collaborators behind
//! traits ([`AssetLedger`](traits::AssetLedger),
//! [`PriceFeeds`](traits::PriceFeeds), [`Clock`](traits::Clock)); in-memory
//! implementations live in [`adapters`].
//!
//! ## Create a pool, swap, and read its value
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use hydra_tracker::adapters::{InMemoryLedger, ManualClock, StaticPriceFeeds};
//! use hydra_tracker::config::{MetricsConfig, RegistryConfig, TrackerConfig};
//! use hydra_tracker::domain::{Address, Amount, FeeTier, OraclePrice, Timestamp};
//! use hydra_tracker::exchange::Exchange;
//!
//! let registry = Address::new([0xAA; 20]);
//! let admin = Address::new([0xBB; 20]);
//! let usd_feed = Address::new([0xCC; 20]);
//! let weth = Address::new([1; 20]);
//! let dai = Address::new([2; 20]);
//! let lp = Address::new([3; 20]);
//!
//! let ledger = Arc::new(InMemoryLedger::new());
//! let feeds = Arc::new(StaticPriceFeeds::new());
//! feeds.set(usd_feed, OraclePrice::new(2_000, 0, Timestamp::EPOCH));
//!
//! let config = TrackerConfig::new(
//!     RegistryConfig::new(registry, admin, FeeTier::ZERO).expect("valid registry"),
//!     MetricsConfig::with_defaults(usd_feed),
//! )
//! .expect("valid config");
//! let exchange = Exchange::new(
//!     &config,
//!     ledger.clone(),
//!     feeds,
//!     Arc::new(ManualClock::new(Timestamp::EPOCH)),
//! )
//! .expect("exchange");
//!
//! // Fund the creator and let the registry pull the seed deposit.
//! for token in [weth, dai] {
//!     ledger.mint(token, lp, Amount::new(1_000)).expect("mint");
//!     ledger.approve(token, lp, registry, Amount::new(1_000));
//! }
//! let pool = exchange
//!     .create_pool(lp, weth, dai, Amount::new(1_000), Amount::new(1_000))
//!     .expect("pool created");
//!
//! // Sell 100 DAI into the fee-free pool.
//! ledger.mint(dai, lp, Amount::new(100)).expect("mint");
//! ledger.approve(dai, lp, pool, Amount::new(100));
//! let outcome = exchange
//!     .swap(lp, dai, weth, Amount::new(100), Amount::ZERO)
//!     .expect("swap");
//! assert_eq!(outcome.amount_out(), Amount::new(90));
//!
//! // WETH has its own feed.
//! exchange.add_routing_address(admin, weth, usd_feed).expect("admin");
//! assert_eq!(exchange.usd_value(weth, Amount::new(1)), Ok(Amount::new(2_000)));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Exchange    │  locks, clock, collaborators
//! └──────┬───────┘
//!        │
//!        ├──────────────────────────┐
//!        ▼                          ▼
//! ┌──────────────┐          ┌──────────────┐
//! │ PoolRegistry  │◀─────────│ PoolMetrics   │  read-only valuation
//! └──────┬───────┘          └──────────────┘
//!        │ PoolHandle (Arc<RwLock<_>>)
//!        ▼
//! ┌──────────────┐
//! │ Constant      │  swap, add / remove liquidity
//! │ ProductPool   │
//! └──────┬───────┘
//!        │ AssetLedger
//!        ▼
//! ┌──────────────┐
//! │   Domain      │  Address, Amount, Shares, FeeTier, …
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`Address`](domain::Address), [`Amount`](domain::Amount), [`Shares`](domain::Shares), etc. |
//! | [`traits`] | Collaborator seams and [`FromConfig`](traits::FromConfig) |
//! | [`config`] | TOML-loadable [`TrackerConfig`](config::TrackerConfig) and its sections |
//! | [`pools`] | [`ConstantProductPool`](pools::ConstantProductPool) |
//! | [`registry`] | [`PoolRegistry`](registry::PoolRegistry), routing entries, events |
//! | [`metrics`] | [`MetricsEngine`](metrics::MetricsEngine) and [`PoolMetrics`](metrics::PoolMetrics) |
//! | [`exchange`] | [`Exchange`](exchange::Exchange), the thread-safe facade |
//! | [`adapters`] | In-memory ledger, static price feeds, clocks |
//! | [`math`] | Checked arithmetic, `mul_div`, integer square root |
//! | [`error`] | [`TrackerError`](error::TrackerError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod exchange;
pub mod math;
pub mod metrics;
pub mod pools;
pub mod prelude;
pub mod registry;
pub mod traits;
