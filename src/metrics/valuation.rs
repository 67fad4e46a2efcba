//! Result of valuing an amount of a token through the routing table.

use core::fmt;

use crate::domain::{Address, Amount};
use crate::error::TrackerError;

/// How an amount of a token was valued.
///
/// Keeps "no path" distinct from a genuine zero valuation even though
/// [`usd_value`](super::PoolMetrics::usd_value) reports both as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Valuation {
    /// The token has its own routing entry.
    Direct {
        /// `price × amount`.
        value: Amount,
        /// The feed that priced the token.
        feed: Address,
    },
    /// The token was quoted through its pool with a routing token.
    Routed {
        /// `price × quote(unit) × amount / unit`.
        value: Amount,
        /// The feed of the routing token.
        feed: Address,
        /// The routing token the pool quoted into.
        via: Address,
    },
    /// No routing entry and no pool to a routing token.
    NoPath,
}

impl Valuation {
    /// Returns the value, with [`NoPath`](Self::NoPath) as zero.
    #[must_use]
    pub const fn value(&self) -> Amount {
        match self {
            Self::Direct { value, .. } | Self::Routed { value, .. } => *value,
            Self::NoPath => Amount::ZERO,
        }
    }

    /// Returns `true` unless this is [`NoPath`](Self::NoPath).
    #[must_use]
    pub const fn has_path(&self) -> bool {
        !matches!(self, Self::NoPath)
    }

    /// Returns the value, treating a missing path as an error.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NoValuationPath`] for [`NoPath`](Self::NoPath).
    pub const fn require(&self, token: Address) -> Result<Amount, TrackerError> {
        match self {
            Self::Direct { value, .. } | Self::Routed { value, .. } => Ok(*value),
            Self::NoPath => Err(TrackerError::NoValuationPath(token)),
        }
    }
}

impl fmt::Display for Valuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct { value, feed } => write!(f, "{value} (direct via feed {feed})"),
            Self::Routed { value, feed, via } => {
                write!(f, "{value} (routed through {via}, feed {feed})")
            }
            Self::NoPath => f.write_str("no valuation path"),
        }
    }
}
