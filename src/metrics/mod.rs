//! Read-only market metrics over the registry, its pools and price feeds.
//!
//! | Metric | Formula |
//! |--------|---------|
//! | `usd_value(t, n)` | first routing entry for `t`: `price × n`; else first routing token with a pool to `t`: `price × quote(t, unit) × n / unit`; else `0` |
//! | `market_cap(t)` | `usd_value(t, total_supply(t))` |
//! | `pair_market_cap(a, b)` | `market_cap(a) + market_cap(b)` |
//! | `tvl(t)` | `usd_value(t, Σ balance of t in every pool containing t)` |
//! | `pair_tvl(a, b)` | `usd_value(a, pool balance of a) + usd_value(b, pool balance of b)` |
//! | `tvl_ratio(t)` | `tvl(t) × 100 / market_cap(t)` |
//! | `pair_tvl_ratio(a, b)` | `pair_tvl × 100 / pair_market_cap` |
//! | `total_roi(a, b)` | `yield × base_price × 100 / pair_tvl` |
//! | `daily_rate(a, b)` | `yield / whole days since the pool was seeded` |
//! | `daily_roi(a, b)` | `base_price × daily_rate × roi_scale / pair_tvl` |
//!
//! Every result is an integer in the price feeds' fixed-point units. Every
//! division guards its denominator and reports
//! [`DivisionByZero`](crate::error::TrackerError::DivisionByZero) naming it.

mod pool_metrics;
mod valuation;

pub use pool_metrics::{MetricsEngine, PoolMetrics};
pub use valuation::Valuation;
