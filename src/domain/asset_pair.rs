//! Unordered pair of distinct assets.

use super::Address;
use crate::error::TrackerError;

/// An unordered pair of distinct assets, stored in canonical order.
///
/// `AssetPair::new(a, b) == AssetPair::new(b, a)`, so the registry keys
/// pools by `AssetPair` and a single entry answers lookups in both
/// directions.
///
/// # Examples
///
/// ```
/// use hydra_tracker::domain::{Address, AssetPair};
///
/// let x = Address::new([1u8; 20]);
/// let y = Address::new([2u8; 20]);
///
/// let pair = AssetPair::new(y, x).expect("distinct assets");
/// assert_eq!(pair.first(), x);
/// assert_eq!(pair, AssetPair::new(x, y).expect("distinct assets"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssetPair {
    first: Address,
    second: Address,
}

impl AssetPair {
    /// Creates a canonically-ordered pair.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::IdenticalAssets`] if both addresses are equal.
    pub fn new(a: Address, b: Address) -> Result<Self, TrackerError> {
        if a == b {
            return Err(TrackerError::IdenticalAssets(a));
        }
        let (first, second) = if a < b { (a, b) } else { (b, a) };
        Ok(Self { first, second })
    }

    /// Returns the lower address.
    #[must_use]
    pub const fn first(&self) -> Address {
        self.first
    }

    /// Returns the higher address.
    #[must_use]
    pub const fn second(&self) -> Address {
        self.second
    }

    /// Returns `true` if `asset` is one side of the pair.
    #[must_use]
    pub fn contains(&self, asset: &Address) -> bool {
        self.first == *asset || self.second == *asset
    }

    /// Returns the counterpart of `asset`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::UnknownAsset`] if `asset` is not in the pair.
    pub fn other(&self, asset: &Address) -> Result<Address, TrackerError> {
        if *asset == self.first {
            Ok(self.second)
        } else if *asset == self.second {
            Ok(self.first)
        } else {
            Err(TrackerError::UnknownAsset(*asset))
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn addr(b: u8) -> Address {
        Address::new([b; 20])
    }

    #[test]
    fn canonical_order_is_symmetric() {
        let (Ok(p1), Ok(p2)) = (
            AssetPair::new(addr(1), addr(2)),
            AssetPair::new(addr(2), addr(1)),
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(p1, p2);
        assert_eq!(p1.first(), addr(1));
        assert_eq!(p1.second(), addr(2));
    }

    #[test]
    fn rejects_identical_assets() {
        let Err(e) = AssetPair::new(addr(3), addr(3)) else {
            panic!("expected Err");
        };
        assert_eq!(e, TrackerError::IdenticalAssets(addr(3)));
    }

    #[test]
    fn contains_and_other() {
        let Ok(pair) = AssetPair::new(addr(1), addr(2)) else {
            panic!("expected Ok");
        };
        assert!(pair.contains(&addr(1)));
        assert!(!pair.contains(&addr(9)));
        assert_eq!(pair.other(&addr(1)), Ok(addr(2)));
        assert_eq!(pair.other(&addr(2)), Ok(addr(1)));
        assert_eq!(pair.other(&addr(9)), Err(TrackerError::UnknownAsset(addr(9))));
    }
}
