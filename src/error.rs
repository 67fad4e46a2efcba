//! Unified error types for the Hydra Tracker library.
//!
//! All fallible operations across the crate return [`TrackerError`] as their
//! error type. Failures are reported synchronously to the caller of the
//! operation that raised them, and an operation that fails leaves no
//! partial state behind.

use thiserror::Error;

use crate::domain::{Address, Amount};

/// Crate-wide error enum.
///
/// The enum is `Clone + PartialEq` so callers (and tests) can match on exact
/// variants, including the static context carried by arithmetic failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    /// A pool already exists for this unordered asset pair.
    #[error("a pool already exists for pair {0} / {1}")]
    DuplicatePair(Address, Address),

    /// The asset is not one of the two assets held by the pool.
    #[error("asset {0} is not part of this pool")]
    UnknownAsset(Address),

    /// The caller is not the administrative owner.
    #[error("caller {0} is not the owner")]
    NotOwner(Address),

    /// The spender's allowance does not cover the requested transfer.
    #[error("allowance of {available} is below the requested {requested}")]
    InsufficientAllowance {
        /// Allowance currently granted.
        available: Amount,
        /// Amount the transfer needs.
        requested: Amount,
    },

    /// The asset ledger refused a transfer.
    #[error("transfer failed: {0}")]
    TransferFailed(&'static str),

    /// A sequence lookup went past the end of the sequence.
    #[error("index {index} is out of range for length {len}")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Current sequence length.
        len: usize,
    },

    /// A denominator was zero.
    #[error("division by zero: {0}")]
    DivisionByZero(&'static str),

    /// No routing entry can value the asset.
    #[error("no valuation path for asset {0}")]
    NoValuationPath(Address),

    /// No pool is registered for the pair.
    #[error("no pool exists for pair {0} / {1}")]
    PoolNotFound(Address, Address),

    /// Both sides of a pair are the same asset.
    #[error("a pool requires two distinct assets, got {0} twice")]
    IdenticalAssets(Address),

    /// An amount that must be positive was zero.
    #[error("amount must be non-zero: {0}")]
    ZeroAmount(&'static str),

    /// Arithmetic overflow.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Arithmetic underflow.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Reserves cannot satisfy the request.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// The provider holds fewer pool shares than requested.
    #[error("provider holds {held} shares, {requested} requested")]
    InsufficientShares {
        /// Shares currently held by the provider.
        held: u128,
        /// Shares the caller tried to burn.
        requested: u128,
    },

    /// A quantity is invalid for the requested operation.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(&'static str),

    /// The fee configuration is outside `0..=10_000` basis points.
    #[error("invalid fee: {0}")]
    InvalidFee(&'static str),

    /// An oracle answer is unusable.
    #[error("invalid price: {0}")]
    InvalidPrice(&'static str),

    /// An oracle answer is older than the configured maximum age.
    #[error("price from feed {feed} is {age_secs}s old")]
    StalePrice {
        /// Feed that produced the answer.
        feed: Address,
        /// Age of the answer in seconds.
        age_secs: u64,
    },

    /// The quoted output is below the caller's minimum.
    #[error("swap output {actual} is below the minimum {min_out}")]
    SlippageExceeded {
        /// Minimum the caller accepts.
        min_out: Amount,
        /// Output the pool would pay.
        actual: Amount,
    },

    /// No price feed is registered under the address.
    #[error("unknown price feed {0}")]
    UnknownPriceFeed(Address),

    /// A configuration value is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl TrackerError {
    /// Maps the error onto an HTTP-style status code for service wrappers.
    ///
    /// Validation failures are `400`, authorization `403`, missing
    /// entities `404`, state conflicts `409`, and oracle or arithmetic
    /// faults `422`/`500`.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotOwner(_) => 403,
            Self::PoolNotFound(..) | Self::UnknownPriceFeed(_) | Self::IndexOutOfRange { .. } => {
                404
            }
            Self::DuplicatePair(..) => 409,
            Self::UnknownAsset(_)
            | Self::IdenticalAssets(_)
            | Self::ZeroAmount(_)
            | Self::InvalidQuantity(_)
            | Self::InvalidFee(_)
            | Self::InvalidConfiguration(_)
            | Self::SlippageExceeded { .. }
            | Self::InsufficientShares { .. }
            | Self::InsufficientAllowance { .. } => 400,
            Self::TransferFailed(_)
            | Self::InsufficientLiquidity
            | Self::DivisionByZero(_)
            | Self::NoValuationPath(_)
            | Self::InvalidPrice(_)
            | Self::StalePrice { .. } => 422,
            Self::Overflow(_) | Self::Underflow(_) => 500,
        }
    }
}

/// Result alias for downstream code. Signatures inside the crate name
/// [`TrackerError`] explicitly.
pub type Result<T> = core::result::Result<T, TrackerError>;
