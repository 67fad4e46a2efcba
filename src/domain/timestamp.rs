//! Unix timestamps in whole seconds.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Seconds in one day, the unit of [`Timestamp::whole_days_since`].
pub const SECONDS_PER_DAY: u64 = 86_400;

/// A point in time as whole seconds since the Unix epoch.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The Unix epoch.
    pub const EPOCH: Self = Self(0);

    /// Creates a timestamp from seconds since the epoch.
    #[must_use]
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// Returns seconds since the epoch.
    #[must_use]
    pub const fn as_secs(&self) -> u64 {
        self.0
    }

    /// Seconds elapsed since `earlier`, or zero if `earlier` is in the future.
    #[must_use]
    pub const fn saturating_secs_since(&self, earlier: Self) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Whole days elapsed since `earlier`, truncated.
    #[must_use]
    pub const fn whole_days_since(&self, earlier: Self) -> u64 {
        self.saturating_secs_since(earlier) / SECONDS_PER_DAY
    }

    /// Returns `self` advanced by `secs`, saturating at `u64::MAX`.
    #[must_use]
    pub const fn plus_secs(&self, secs: u64) -> Self {
        Self(self.0.saturating_add(secs))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_days_truncate() {
        let t0 = Timestamp::from_secs(1_000);
        assert_eq!(t0.plus_secs(SECONDS_PER_DAY - 1).whole_days_since(t0), 0);
        assert_eq!(t0.plus_secs(SECONDS_PER_DAY).whole_days_since(t0), 1);
        assert_eq!(t0.plus_secs(3 * SECONDS_PER_DAY + 5).whole_days_since(t0), 3);
    }

    #[test]
    fn earlier_in_future_is_zero() {
        let t = Timestamp::from_secs(10);
        assert_eq!(t.saturating_secs_since(Timestamp::from_secs(20)), 0);
    }
}
