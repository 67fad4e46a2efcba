//! Fundamental domain value types used throughout the tracker.
//!
//! Amounts, shares, fees, timestamps and oracle answers are newtypes with
//! validated constructors, so an `Amount` can never be passed where `Shares`
//! are expected and a fee can never exceed 100%. Pools, tokens, feeds and
//! accounts are identified by EVM [`Address`]es.

mod amount;
mod asset_pair;
mod fee_tier;
mod oracle_price;
mod rounding;
mod shares;
mod swap_outcome;
mod timestamp;

pub use alloy_primitives::Address;
pub use amount::Amount;
pub use asset_pair::AssetPair;
pub use fee_tier::{FeeTier, BPS_DENOMINATOR};
pub use oracle_price::OraclePrice;
pub use rounding::Rounding;
pub use shares::Shares;
pub use swap_outcome::SwapOutcome;
pub use timestamp::{Timestamp, SECONDS_PER_DAY};
