//! Metric computations.

use tracing::debug;

use super::Valuation;
use crate::config::MetricsConfig;
use crate::domain::{Address, Amount, Rounding, Timestamp};
use crate::error::TrackerError;
use crate::math::{mul_div, CheckedArithmetic};
use crate::pools::ConstantProductPool;
use crate::registry::PoolRegistry;
use crate::traits::{AssetLedger, FromConfig, PriceFeeds};

const PERCENT: Amount = Amount::new(100);

/// Validated metric settings.
///
/// Holds no market state. [`bind`](Self::bind) pairs it with a registry
/// and the collaborators to produce a [`PoolMetrics`] view for queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsEngine {
    base_feed: Address,
    roi_scale: Amount,
    quote_unit: Amount,
    max_price_age_secs: Option<u64>,
}

impl FromConfig<MetricsConfig> for MetricsEngine {
    /// Creates the engine.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`MetricsConfig::validate`].
    fn from_config(config: &MetricsConfig) -> Result<Self, TrackerError> {
        config.validate()?;
        Ok(Self {
            base_feed: config.base_feed(),
            roi_scale: config.roi_scale(),
            quote_unit: config.quote_unit(),
            max_price_age_secs: config.max_price_age_secs(),
        })
    }
}

impl MetricsEngine {
    /// Returns the base-currency feed.
    #[must_use]
    pub const fn base_feed(&self) -> Address {
        self.base_feed
    }

    /// Returns a query view over `registry` at time `now`.
    #[must_use]
    pub fn bind<'a>(
        &'a self,
        registry: &'a PoolRegistry,
        ledger: &'a dyn AssetLedger,
        feeds: &'a dyn PriceFeeds,
        now: Timestamp,
    ) -> PoolMetrics<'a> {
        PoolMetrics {
            engine: self,
            registry,
            ledger,
            feeds,
            now,
        }
    }
}

/// A read-only view answering metric queries.
///
/// Borrows the registry for its whole lifetime, so no pool can be created
/// while a view exists. Pools are read-locked one at a time, and never
/// while another pool lock is held.
///
/// Pair metrics read their pool once: its state and both ledger balances
/// are copied under one read lock, so a concurrent swap is either wholly
/// visible or not at all.
pub struct PoolMetrics<'a> {
    engine: &'a MetricsEngine,
    registry: &'a PoolRegistry,
    ledger: &'a dyn AssetLedger,
    feeds: &'a dyn PriceFeeds,
    now: Timestamp,
}

impl PoolMetrics<'_> {
    // -- valuation ------------------------------------------------------------

    /// Values `amount` of `token` in the feeds' units.
    ///
    /// Scans the routing table twice, in insertion order, and stops at the
    /// first match each time:
    ///
    /// 1. an entry for `token` itself values it directly;
    /// 2. otherwise an entry whose token has a pool with `token` values it
    ///    through that pool's quote for one quote unit.
    ///
    /// Only single-hop routes are considered.
    ///
    /// # Errors
    ///
    /// - [`TrackerError::UnknownPriceFeed`], [`TrackerError::InvalidPrice`] or
    ///   [`TrackerError::StalePrice`] from the chosen feed.
    /// - [`TrackerError::Overflow`] if the product overflows.
    pub fn valuation(&self, token: Address, amount: Amount) -> Result<Valuation, TrackerError> {
        self.valuation_in(token, amount, None)
    }

    /// [`valuation`](Self::valuation), quoting from `reading` instead of
    /// the live pool when the route passes through the pool it was taken
    /// from.
    fn valuation_in(
        &self,
        token: Address,
        amount: Amount,
        reading: Option<&PoolReading>,
    ) -> Result<Valuation, TrackerError> {
        let routing = self.registry.routing_entries();

        if let Some(entry) = routing.iter().find(|entry| entry.token() == token) {
            let price = self.price(entry.price_feed())?;
            let value = price.safe_mul(&amount)?;
            debug!(%token, %amount, feed = %entry.price_feed(), %value, "valued directly");
            return Ok(Valuation::Direct {
                value,
                feed: entry.price_feed(),
            });
        }

        for entry in routing {
            let Some(pool_address) = self.registry.pair_to_pool(token, entry.token()) else {
                continue;
            };
            let quote = match reading {
                Some(reading) if reading.pool.address() == pool_address => reading
                    .pool
                    .get_swap_quantity(token, self.engine.quote_unit)?,
                _ => {
                    let Some(handle) = self.registry.pool_by_address(pool_address) else {
                        continue;
                    };
                    let quote = handle
                        .read()
                        .get_swap_quantity(token, self.engine.quote_unit)?;
                    quote
                }
            };
            let price = self.price(entry.price_feed())?;
            let value = mul_div(
                price.safe_mul(&quote)?,
                amount,
                self.engine.quote_unit,
                Rounding::Down,
                "quote unit is zero",
            )?;
            debug!(
                %token,
                %amount,
                via = %entry.token(),
                pool = %pool_address,
                %quote,
                %value,
                "valued through pool"
            );
            return Ok(Valuation::Routed {
                value,
                feed: entry.price_feed(),
                via: entry.token(),
            });
        }

        debug!(%token, "no valuation path");
        Ok(Valuation::NoPath)
    }

    /// Values `amount` of `token`, reporting a missing path as zero.
    ///
    /// # Errors
    ///
    /// Same as [`valuation`](Self::valuation).
    pub fn usd_value(&self, token: Address, amount: Amount) -> Result<Amount, TrackerError> {
        Ok(self.valuation(token, amount)?.value())
    }

    // -- market cap -----------------------------------------------------------

    /// Values the whole supply of `token`.
    ///
    /// # Errors
    ///
    /// Same as [`valuation`](Self::valuation).
    pub fn market_cap(&self, token: Address) -> Result<Amount, TrackerError> {
        self.usd_value(token, self.ledger.total_supply(token))
    }

    /// Sums the market caps of `a` and `b`.
    ///
    /// # Errors
    ///
    /// Same as [`valuation`](Self::valuation).
    pub fn pair_market_cap(&self, a: Address, b: Address) -> Result<Amount, TrackerError> {
        self.market_cap(a)?.safe_add(&self.market_cap(b)?)
    }

    // -- value locked ---------------------------------------------------------

    /// Values every unit of `token` held by any pool.
    ///
    /// # Errors
    ///
    /// Same as [`valuation`](Self::valuation), plus
    /// [`TrackerError::Overflow`] if the balances overflow.
    pub fn tvl(&self, token: Address) -> Result<Amount, TrackerError> {
        let mut locked = Amount::ZERO;
        for &other in self.registry.pool_pairs_of(token) {
            let Ok(handle) = self.registry.pool(token, other) else {
                continue;
            };
            let balance = {
                let pool = handle.read();
                self.ledger.balance_of(token, pool.address())
            };
            locked = locked.safe_add(&balance)?;
        }
        self.usd_value(token, locked)
    }

    /// Values both balances of the pool of `{a, b}`.
    ///
    /// # Errors
    ///
    /// [`TrackerError::PoolNotFound`] if the pair has no pool, otherwise
    /// the same as [`valuation`](Self::valuation).
    pub fn pair_tvl(&self, a: Address, b: Address) -> Result<Amount, TrackerError> {
        let reading = self.read_pool(a, b)?;
        self.reading_tvl(&reading)
    }

    /// Percentage of `token`'s market cap locked in pools.
    ///
    /// # Errors
    ///
    /// [`TrackerError::DivisionByZero`] if the market cap is zero,
    /// otherwise the errors of [`tvl`](Self::tvl) and
    /// [`market_cap`](Self::market_cap).
    pub fn tvl_ratio(&self, token: Address) -> Result<Amount, TrackerError> {
        let tvl = self.tvl(token)?;
        let market_cap = self.market_cap(token)?;
        mul_div(
            tvl,
            PERCENT,
            market_cap,
            Rounding::Down,
            "market cap is zero",
        )
    }

    /// Percentage of the pair's combined market cap locked in its pool.
    ///
    /// # Errors
    ///
    /// [`TrackerError::DivisionByZero`] if the pair market cap is zero,
    /// otherwise the errors of [`pair_tvl`](Self::pair_tvl).
    pub fn pair_tvl_ratio(&self, a: Address, b: Address) -> Result<Amount, TrackerError> {
        let tvl = self.pair_tvl(a, b)?;
        let market_cap = self.pair_market_cap(a, b)?;
        mul_div(
            tvl,
            PERCENT,
            market_cap,
            Rounding::Down,
            "pair market cap is zero",
        )
    }

    // -- returns --------------------------------------------------------------

    /// Lifetime yield of the pool of `{a, b}`, valued at the base price,
    /// as a percentage of its value locked.
    ///
    /// # Errors
    ///
    /// - [`TrackerError::PoolNotFound`] if the pair has no pool.
    /// - [`TrackerError::DivisionByZero`] if the pair's value locked is zero.
    /// - Errors of the base feed and of [`pair_tvl`](Self::pair_tvl).
    pub fn total_roi(&self, a: Address, b: Address) -> Result<Amount, TrackerError> {
        let reading = self.read_pool(a, b)?;
        let profit = reading
            .pool
            .yield_amount()?
            .safe_mul(&self.price(self.engine.base_feed)?)?;
        let pair_tvl = self.reading_tvl(&reading)?;
        mul_div(
            profit,
            PERCENT,
            pair_tvl,
            Rounding::Down,
            "pair tvl is zero",
        )
    }

    /// Yield of the pool of `{a, b}` per whole day since it was seeded.
    ///
    /// Days are counted from the pool owner's first deposit time, in
    /// 86 400-second days, truncated.
    ///
    /// # Errors
    ///
    /// - [`TrackerError::PoolNotFound`] if the pair has no pool.
    /// - [`TrackerError::DivisionByZero`] during the pool's first day.
    pub fn daily_rate(&self, a: Address, b: Address) -> Result<Amount, TrackerError> {
        self.reading_daily_rate(&self.read_pool(a, b)?)
    }

    /// Daily yield of the pool of `{a, b}` at the base price, scaled by the
    /// configured factor, relative to its value locked.
    ///
    /// # Errors
    ///
    /// - Errors of [`daily_rate`](Self::daily_rate), checked first.
    /// - [`TrackerError::DivisionByZero`] if the pair's value locked is zero.
    pub fn daily_roi(&self, a: Address, b: Address) -> Result<Amount, TrackerError> {
        let reading = self.read_pool(a, b)?;
        let daily_rate = self.reading_daily_rate(&reading)?;
        let scaled = self
            .price(self.engine.base_feed)?
            .safe_mul(&daily_rate)?;
        let pair_tvl = self.reading_tvl(&reading)?;
        mul_div(
            scaled,
            self.engine.roi_scale,
            pair_tvl,
            Rounding::Down,
            "pair tvl is zero",
        )
    }

    // -- helpers --------------------------------------------------------------

    /// Copies the pool of `{a, b}` and its two ledger balances under one
    /// read lock.
    fn read_pool(&self, a: Address, b: Address) -> Result<PoolReading, TrackerError> {
        let handle = self.registry.pool(a, b)?;
        let pool = handle.read();
        let balance_one = self.ledger.balance_of(pool.asset_one(), pool.address());
        let balance_two = self.ledger.balance_of(pool.asset_two(), pool.address());
        Ok(PoolReading {
            pool: ConstantProductPool::clone(&pool),
            balance_one,
            balance_two,
        })
    }

    fn reading_tvl(&self, reading: &PoolReading) -> Result<Amount, TrackerError> {
        let mut total = Amount::ZERO;
        for (asset, balance) in reading.balances() {
            let value = self.valuation_in(asset, balance, Some(reading))?.value();
            total = total.safe_add(&value)?;
        }
        Ok(total)
    }

    fn reading_daily_rate(&self, reading: &PoolReading) -> Result<Amount, TrackerError> {
        let pool = &reading.pool;
        let seeded_at = pool.initial_liquidity_provided_time(pool.owner());
        let days = seeded_at.map_or(0, |at| self.now.whole_days_since(at));
        if days == 0 {
            return Err(TrackerError::DivisionByZero("pool is less than a day old"));
        }
        pool.yield_amount()?
            .safe_div(&Amount::new(u128::from(days)), Rounding::Down)
    }

    /// Latest non-negative answer of `feed`, checked for staleness.
    fn price(&self, feed: Address) -> Result<Amount, TrackerError> {
        let answer = self.feeds.latest_price(feed)?;
        if let Some(max_age) = self.engine.max_price_age_secs {
            let age_secs = self.now.saturating_secs_since(answer.updated_at());
            if age_secs > max_age {
                return Err(TrackerError::StalePrice { feed, age_secs });
            }
        }
        answer.value()
    }
}

/// One pool's state and ledger balances, copied under a single read lock.
struct PoolReading {
    pool: ConstantProductPool,
    balance_one: Amount,
    balance_two: Amount,
}

impl PoolReading {
    fn balances(&self) -> [(Address, Amount); 2] {
        [
            (self.pool.asset_one(), self.balance_one),
            (self.pool.asset_two(), self.balance_two),
        ]
    }
}
