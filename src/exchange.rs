//! Thread-safe facade over the registry, its pools and the metrics.
//!
//! # Locking
//!
//! | Lock | Taken by |
//! |------|----------|
//! | registry write | `create_pool`, `add_routing_address`, `drain_events` |
//! | registry read | lookups and every metric query, for the whole query |
//! | pool write | `swap`, `add_liquidity`, `remove_liquidity` |
//! | pool read | quotes, snapshots and metric reads of that pool |
//!
//! Mutators release the registry lock before locking their pool, and no
//! code path holds two pool locks at once, so the locks cannot deadlock.
//! Writes to one pool are serialized; writes to different pools and all
//! reads run concurrently.
//!
//! A metric over one pool reads that pool's state and ledger balances under
//! a single pool read lock, so it reflects one committed state of the pool.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use crate::config::TrackerConfig;
use crate::domain::{Address, Amount, Shares, SwapOutcome};
use crate::error::TrackerError;
use crate::metrics::{MetricsEngine, PoolMetrics, Valuation};
use crate::pools::ConstantProductPool;
use crate::registry::{PoolHandle, PoolRegistry, RegistryEvent, RoutingEntry};
use crate::traits::{AssetLedger, Clock, FromConfig, PriceFeeds};

/// The tracker as one shareable context object.
///
/// Wrap it in an [`Arc`] to share it between threads; every method takes
/// `&self`.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use hydra_tracker::adapters::{InMemoryLedger, ManualClock, StaticPriceFeeds};
/// use hydra_tracker::config::TrackerConfig;
/// use hydra_tracker::domain::{Address, Amount, Timestamp};
/// use hydra_tracker::exchange::Exchange;
///
/// let config = TrackerConfig::from_toml_str(r#"
///     [registry]
///     address = "0x00000000000000000000000000000000000000aa"
///     admin = "0x00000000000000000000000000000000000000bb"
///     [metrics]
///     base_feed = "0x00000000000000000000000000000000000000cc"
/// "#).expect("valid config");
///
/// let exchange = Exchange::new(
///     &config,
///     Arc::new(InMemoryLedger::new()),
///     Arc::new(StaticPriceFeeds::new()),
///     Arc::new(ManualClock::new(Timestamp::EPOCH)),
/// ).expect("valid exchange");
///
/// let nobody = Address::new([7; 20]);
/// assert_eq!(exchange.usd_value(nobody, Amount::new(500)), Ok(Amount::ZERO));
/// ```
pub struct Exchange {
    registry: RwLock<PoolRegistry>,
    metrics: MetricsEngine,
    ledger: Arc<dyn AssetLedger>,
    feeds: Arc<dyn PriceFeeds>,
    clock: Arc<dyn Clock>,
}

impl Exchange {
    /// Builds an exchange from `config` and its collaborators.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::InvalidConfiguration`] if `config` is invalid.
    pub fn new(
        config: &TrackerConfig,
        ledger: Arc<dyn AssetLedger>,
        feeds: Arc<dyn PriceFeeds>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, TrackerError> {
        config.validate()?;
        let registry = PoolRegistry::from_config(config.registry())?;
        let metrics = MetricsEngine::from_config(config.metrics())?;
        info!(
            registry = %registry.address(),
            admin = %registry.admin(),
            fee = %registry.fee_tier(),
            "exchange started"
        );
        Ok(Self {
            registry: RwLock::new(registry),
            metrics,
            ledger,
            feeds,
            clock,
        })
    }

    /// Returns the registry address. Callers approve it for seed deposits.
    #[must_use]
    pub fn registry_address(&self) -> Address {
        self.registry.read().address()
    }

    /// Returns the administrative owner.
    #[must_use]
    pub fn admin(&self) -> Address {
        self.registry.read().admin()
    }

    // -- registry -------------------------------------------------------------

    /// Creates and seeds the pool for `{asset_a, asset_b}`.
    ///
    /// # Errors
    ///
    /// See [`PoolRegistry::create_pool`].
    pub fn create_pool(
        &self,
        creator: Address,
        asset_a: Address,
        asset_b: Address,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<Address, TrackerError> {
        let now = self.clock.now();
        self.registry.write().create_pool(
            self.ledger.as_ref(),
            creator,
            asset_a,
            asset_b,
            amount_a,
            amount_b,
            now,
        )
    }

    /// Appends a routing entry.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotOwner`] unless `caller` is the admin.
    pub fn add_routing_address(
        &self,
        caller: Address,
        token: Address,
        price_feed: Address,
    ) -> Result<(), TrackerError> {
        self.registry
            .write()
            .add_routing_address(caller, token, price_feed)
    }

    /// Returns and clears the registry events.
    pub fn drain_events(&self) -> Vec<RegistryEvent> {
        self.registry.write().drain_events()
    }

    /// Returns the pool of `{a, b}`, in either order.
    #[must_use]
    pub fn pair_to_pool(&self, a: Address, b: Address) -> Option<Address> {
        self.registry.read().pair_to_pool(a, b)
    }

    /// See [`PoolRegistry::pools`].
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::IndexOutOfRange`] past the end.
    pub fn pools(&self, index: usize) -> Result<Address, TrackerError> {
        self.registry.read().pools(index)
    }

    /// Returns the number of pools.
    #[must_use]
    pub fn pools_len(&self) -> usize {
        self.registry.read().pools_len()
    }

    /// See [`PoolRegistry::pool_pairs`].
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::IndexOutOfRange`] past the end.
    pub fn pool_pairs(&self, token: Address, index: usize) -> Result<Address, TrackerError> {
        self.registry.read().pool_pairs(token, index)
    }

    /// Returns the number of pools containing `token`.
    #[must_use]
    pub fn pool_pairs_len(&self, token: Address) -> usize {
        self.registry.read().pool_pairs_len(token)
    }

    /// See [`PoolRegistry::tokens`].
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::IndexOutOfRange`] past the end.
    pub fn tokens(&self, index: usize) -> Result<Address, TrackerError> {
        self.registry.read().tokens(index)
    }

    /// Returns the number of distinct tokens.
    #[must_use]
    pub fn tokens_len(&self) -> usize {
        self.registry.read().tokens_len()
    }

    /// See [`PoolRegistry::pool_owner`].
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::IndexOutOfRange`] past the end.
    pub fn pool_owner(&self, creator: Address, index: usize) -> Result<Address, TrackerError> {
        self.registry.read().pool_owner(creator, index)
    }

    /// Returns the number of pools created by `creator`.
    #[must_use]
    pub fn pool_owner_len(&self, creator: Address) -> usize {
        self.registry.read().pool_owner_len(creator)
    }

    /// See [`PoolRegistry::routing_addresses`].
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::IndexOutOfRange`] past the end.
    pub fn routing_addresses(&self, index: usize) -> Result<RoutingEntry, TrackerError> {
        self.registry.read().routing_addresses(index)
    }

    /// Returns the number of routing entries.
    #[must_use]
    pub fn routing_addresses_len(&self) -> usize {
        self.registry.read().routing_addresses_len()
    }

    // -- pools ----------------------------------------------------------------

    /// Returns a copy of the pool of `{a, b}` as of now.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::PoolNotFound`] if the pair has no pool.
    pub fn pool_snapshot(&self, a: Address, b: Address) -> Result<ConstantProductPool, TrackerError> {
        let pool = self.pool_handle(a, b)?.read().clone();
        Ok(pool)
    }

    /// Quotes a sale of `amount_in` of `asset_in` for `asset_out`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::PoolNotFound`] if the pair has no pool.
    pub fn get_swap_quantity(
        &self,
        asset_in: Address,
        asset_out: Address,
        amount_in: Amount,
    ) -> Result<Amount, TrackerError> {
        let handle = self.pool_handle(asset_in, asset_out)?;
        let quote = handle.read().get_swap_quantity(asset_in, amount_in);
        quote
    }

    /// Sells `amount_in` of `asset_in` for at least `min_amount_out` of
    /// `asset_out`. The trader must have approved the pool address.
    ///
    /// # Errors
    ///
    /// [`TrackerError::PoolNotFound`] if the pair has no pool, otherwise see
    /// [`ConstantProductPool::swap`].
    pub fn swap(
        &self,
        trader: Address,
        asset_in: Address,
        asset_out: Address,
        amount_in: Amount,
        min_amount_out: Amount,
    ) -> Result<SwapOutcome, TrackerError> {
        let handle = self.pool_handle(asset_in, asset_out)?;
        let outcome = handle.write().swap(
            self.ledger.as_ref(),
            trader,
            asset_in,
            amount_in,
            min_amount_out,
        );
        outcome
    }

    /// Deposits `amount_a` of `asset_a` and `amount_b` of `asset_b` into
    /// their pool. The provider must have approved the pool address.
    ///
    /// # Errors
    ///
    /// [`TrackerError::PoolNotFound`] if the pair has no pool, otherwise see
    /// [`ConstantProductPool::add_liquidity`].
    pub fn add_liquidity(
        &self,
        provider: Address,
        asset_a: Address,
        asset_b: Address,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<Shares, TrackerError> {
        let handle = self.pool_handle(asset_a, asset_b)?;
        let now = self.clock.now();
        let mut pool = handle.write();
        let (amount_one, amount_two) = if pool.asset_one() == asset_a {
            (amount_a, amount_b)
        } else {
            (amount_b, amount_a)
        };
        pool.add_liquidity(self.ledger.as_ref(), provider, amount_one, amount_two, now)
    }

    /// Burns `shares` and returns what was paid out, as
    /// `(amount of asset_a, amount of asset_b)`.
    ///
    /// # Errors
    ///
    /// [`TrackerError::PoolNotFound`] if the pair has no pool, otherwise see
    /// [`ConstantProductPool::remove_liquidity`].
    pub fn remove_liquidity(
        &self,
        provider: Address,
        asset_a: Address,
        asset_b: Address,
        shares: Shares,
    ) -> Result<(Amount, Amount), TrackerError> {
        let handle = self.pool_handle(asset_a, asset_b)?;
        let mut pool = handle.write();
        let (out_one, out_two) = pool.remove_liquidity(self.ledger.as_ref(), provider, shares)?;
        if pool.asset_one() == asset_a {
            Ok((out_one, out_two))
        } else {
            Ok((out_two, out_one))
        }
    }

    // -- metrics --------------------------------------------------------------

    /// Runs `query` against a metrics view taken now.
    ///
    /// The registry stays read-locked for the whole query.
    pub fn with_metrics<R>(&self, query: impl FnOnce(&PoolMetrics<'_>) -> R) -> R {
        let registry = self.registry.read();
        let view = self.metrics.bind(
            &registry,
            self.ledger.as_ref(),
            self.feeds.as_ref(),
            self.clock.now(),
        );
        query(&view)
    }

    /// See [`PoolMetrics::valuation`].
    ///
    /// # Errors
    ///
    /// Price feed errors.
    pub fn valuation(&self, token: Address, amount: Amount) -> Result<Valuation, TrackerError> {
        self.with_metrics(|m| m.valuation(token, amount))
    }

    /// See [`PoolMetrics::usd_value`].
    ///
    /// # Errors
    ///
    /// Price feed errors.
    pub fn usd_value(&self, token: Address, amount: Amount) -> Result<Amount, TrackerError> {
        self.with_metrics(|m| m.usd_value(token, amount))
    }

    /// See [`PoolMetrics::market_cap`].
    ///
    /// # Errors
    ///
    /// Price feed errors.
    pub fn market_cap(&self, token: Address) -> Result<Amount, TrackerError> {
        self.with_metrics(|m| m.market_cap(token))
    }

    /// See [`PoolMetrics::pair_market_cap`].
    ///
    /// # Errors
    ///
    /// Price feed errors.
    pub fn pair_market_cap(&self, a: Address, b: Address) -> Result<Amount, TrackerError> {
        self.with_metrics(|m| m.pair_market_cap(a, b))
    }

    /// See [`PoolMetrics::tvl`].
    ///
    /// # Errors
    ///
    /// Price feed errors.
    pub fn tvl(&self, token: Address) -> Result<Amount, TrackerError> {
        self.with_metrics(|m| m.tvl(token))
    }

    /// See [`PoolMetrics::pair_tvl`].
    ///
    /// # Errors
    ///
    /// [`TrackerError::PoolNotFound`] and price feed errors.
    pub fn pair_tvl(&self, a: Address, b: Address) -> Result<Amount, TrackerError> {
        self.with_metrics(|m| m.pair_tvl(a, b))
    }

    /// See [`PoolMetrics::tvl_ratio`].
    ///
    /// # Errors
    ///
    /// [`TrackerError::DivisionByZero`] on a zero market cap.
    pub fn tvl_ratio(&self, token: Address) -> Result<Amount, TrackerError> {
        self.with_metrics(|m| m.tvl_ratio(token))
    }

    /// See [`PoolMetrics::pair_tvl_ratio`].
    ///
    /// # Errors
    ///
    /// [`TrackerError::DivisionByZero`] on a zero pair market cap.
    pub fn pair_tvl_ratio(&self, a: Address, b: Address) -> Result<Amount, TrackerError> {
        self.with_metrics(|m| m.pair_tvl_ratio(a, b))
    }

    /// See [`PoolMetrics::total_roi`].
    ///
    /// # Errors
    ///
    /// [`TrackerError::DivisionByZero`] on a zero pair value locked.
    pub fn total_roi(&self, a: Address, b: Address) -> Result<Amount, TrackerError> {
        self.with_metrics(|m| m.total_roi(a, b))
    }

    /// See [`PoolMetrics::daily_rate`].
    ///
    /// # Errors
    ///
    /// [`TrackerError::DivisionByZero`] during the pool's first day.
    pub fn daily_rate(&self, a: Address, b: Address) -> Result<Amount, TrackerError> {
        self.with_metrics(|m| m.daily_rate(a, b))
    }

    /// See [`PoolMetrics::daily_roi`].
    ///
    /// # Errors
    ///
    /// [`TrackerError::DivisionByZero`] during the pool's first day or on a
    /// zero pair value locked.
    pub fn daily_roi(&self, a: Address, b: Address) -> Result<Amount, TrackerError> {
        self.with_metrics(|m| m.daily_roi(a, b))
    }

    // -- helpers --------------------------------------------------------------

    /// Clones the pool handle and releases the registry lock.
    fn pool_handle(&self, a: Address, b: Address) -> Result<PoolHandle, TrackerError> {
        self.registry.read().pool(a, b)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryLedger, ManualClock, StaticPriceFeeds};
    use crate::config::{MetricsConfig, RegistryConfig};
    use crate::domain::{FeeTier, Timestamp};

    fn addr(b: u8) -> Address {
        Address::new([b; 20])
    }

    const REGISTRY: u8 = 0xAA;
    const ADMIN: u8 = 0xBB;
    const X: u8 = 1;
    const Y: u8 = 2;

    fn exchange(ledger: Arc<InMemoryLedger>) -> Exchange {
        let Ok(registry) =
            RegistryConfig::new(addr(REGISTRY), addr(ADMIN), FeeTier::TIER_0_30_PERCENT)
        else {
            panic!("valid registry config");
        };
        let Ok(config) =
            TrackerConfig::new(registry, MetricsConfig::with_defaults(addr(0xCC)))
        else {
            panic!("valid config");
        };
        let Ok(exchange) = Exchange::new(
            &config,
            ledger,
            Arc::new(StaticPriceFeeds::new()),
            Arc::new(ManualClock::new(Timestamp::from_secs(1))),
        ) else {
            panic!("valid exchange");
        };
        exchange
    }

    #[test]
    fn exchange_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Exchange>();
    }

    #[test]
    fn concurrent_swaps_keep_reserves_consistent() {
        let ledger = Arc::new(InMemoryLedger::new());
        let exchange = exchange(Arc::clone(&ledger));
        let lp = addr(0xC0);
        for asset in [X, Y] {
            let Ok(()) = ledger.mint(addr(asset), lp, Amount::new(1_000_000)) else {
                panic!("mint");
            };
            ledger.approve(addr(asset), lp, addr(REGISTRY), Amount::new(1_000_000));
        }
        let Ok(pool) = exchange.create_pool(
            lp,
            addr(X),
            addr(Y),
            Amount::new(1_000_000),
            Amount::new(1_000_000),
        ) else {
            panic!("create");
        };

        let traders: Vec<Address> = (0..8u8).map(|i| addr(0xD0 + i)).collect();
        for &trader in &traders {
            for asset in [X, Y] {
                let Ok(()) = ledger.mint(addr(asset), trader, Amount::new(10_000)) else {
                    panic!("mint");
                };
                ledger.approve(addr(asset), trader, pool, Amount::new(10_000));
            }
        }

        std::thread::scope(|scope| {
            for (i, &trader) in traders.iter().enumerate() {
                let exchange = &exchange;
                scope.spawn(move || {
                    let (asset_in, asset_out) = if i % 2 == 0 { (X, Y) } else { (Y, X) };
                    for _ in 0..20 {
                        let Ok(_) = exchange.swap(
                            trader,
                            addr(asset_in),
                            addr(asset_out),
                            Amount::new(100),
                            Amount::ZERO,
                        ) else {
                            panic!("swap");
                        };
                    }
                });
            }
        });

        let Ok(snapshot) = exchange.pool_snapshot(addr(X), addr(Y)) else {
            panic!("pool");
        };
        assert_eq!(snapshot.swap_count(), 160);
        assert_eq!(ledger.balance_of(addr(X), pool), snapshot.reserve_one());
        assert_eq!(ledger.balance_of(addr(Y), pool), snapshot.reserve_two());
        assert!(snapshot.reserve_one().get() * snapshot.reserve_two().get() >= 1_000_000_000_000);
    }

    #[test]
    fn liquidity_amounts_follow_caller_order() {
        let ledger = Arc::new(InMemoryLedger::new());
        let exchange = exchange(Arc::clone(&ledger));
        let lp = addr(0xC0);
        for asset in [X, Y] {
            let Ok(()) = ledger.mint(addr(asset), lp, Amount::new(10_000)) else {
                panic!("mint");
            };
            ledger.approve(addr(asset), lp, addr(REGISTRY), Amount::new(10_000));
        }
        let Ok(pool) =
            exchange.create_pool(lp, addr(X), addr(Y), Amount::new(1_000), Amount::new(4_000))
        else {
            panic!("create");
        };
        for asset in [X, Y] {
            ledger.approve(addr(asset), lp, pool, Amount::new(10_000));
        }

        let Ok(minted) =
            exchange.add_liquidity(lp, addr(Y), addr(X), Amount::new(400), Amount::new(100))
        else {
            panic!("add");
        };
        let Ok((y_out, x_out)) = exchange.remove_liquidity(lp, addr(Y), addr(X), minted) else {
            panic!("remove");
        };
        assert_eq!(minted, Shares::new(200));
        assert_eq!(x_out, Amount::new(100));
        assert_eq!(y_out, Amount::new(400));
    }
}
