//! In-memory [`AssetLedger`] with token-contract semantics.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use crate::domain::{Address, Amount};
use crate::error::TrackerError;
use crate::math::CheckedArithmetic;
use crate::traits::AssetLedger;

#[derive(Debug, Default)]
struct LedgerState {
    balances: HashMap<(Address, Address), Amount>,
    allowances: HashMap<(Address, Address, Address), Amount>,
    supplies: HashMap<Address, Amount>,
}

impl LedgerState {
    fn balance(&self, asset: Address, holder: Address) -> Amount {
        self.balances
            .get(&(asset, holder))
            .copied()
            .unwrap_or_default()
    }

    fn move_balance(
        &mut self,
        asset: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), TrackerError> {
        let remaining = self
            .balance(asset, from)
            .checked_sub(&amount)
            .ok_or(TrackerError::TransferFailed("balance below transfer amount"))?;
        if from == to {
            return Ok(());
        }
        let credited = self.balance(asset, to).safe_add(&amount)?;
        self.balances.insert((asset, from), remaining);
        self.balances.insert((asset, to), credited);
        Ok(())
    }
}

/// Thread-safe in-memory ledger covering any number of assets.
///
/// Behaves like a standard fungible-token contract per asset: balances,
/// allowances that `transfer_from` consumes, and a supply that only
/// [`mint`](Self::mint) grows.
///
/// # Examples
///
/// ```
/// use hydra_tracker::adapters::InMemoryLedger;
/// use hydra_tracker::domain::{Address, Amount};
/// use hydra_tracker::traits::AssetLedger;
///
/// let ledger = InMemoryLedger::new();
/// let token = Address::new([1u8; 20]);
/// let alice = Address::new([2u8; 20]);
///
/// ledger.mint(token, alice, Amount::new(1_000)).expect("mint");
/// assert_eq!(ledger.balance_of(token, alice), Amount::new(1_000));
/// assert_eq!(ledger.total_supply(token), Amount::new(1_000));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    state: RwLock<LedgerState>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates `amount` of `asset` in `to`'s balance and grows the supply.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Overflow`] if the balance or supply overflows.
    pub fn mint(&self, asset: Address, to: Address, amount: Amount) -> Result<(), TrackerError> {
        let mut state = self.state.write();
        let supply = state
            .supplies
            .get(&asset)
            .copied()
            .unwrap_or_default()
            .safe_add(&amount)?;
        let balance = state.balance(asset, to).safe_add(&amount)?;
        state.supplies.insert(asset, supply);
        state.balances.insert((asset, to), balance);
        debug!(%asset, %to, %amount, "minted");
        Ok(())
    }

    /// Sets the allowance `spender` may pull from `owner`, replacing any
    /// previous value.
    pub fn approve(&self, asset: Address, owner: Address, spender: Address, amount: Amount) {
        self.state
            .write()
            .allowances
            .insert((asset, owner, spender), amount);
    }
}

impl AssetLedger for InMemoryLedger {
    fn balance_of(&self, asset: Address, holder: Address) -> Amount {
        self.state.read().balance(asset, holder)
    }

    fn allowance(&self, asset: Address, owner: Address, spender: Address) -> Amount {
        self.state
            .read()
            .allowances
            .get(&(asset, owner, spender))
            .copied()
            .unwrap_or_default()
    }

    fn total_supply(&self, asset: Address) -> Amount {
        self.state
            .read()
            .supplies
            .get(&asset)
            .copied()
            .unwrap_or_default()
    }

    fn transfer(
        &self,
        asset: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), TrackerError> {
        self.state.write().move_balance(asset, from, to, amount)
    }

    fn transfer_from(
        &self,
        asset: Address,
        spender: Address,
        owner: Address,
        recipient: Address,
        amount: Amount,
    ) -> Result<(), TrackerError> {
        let mut state = self.state.write();
        let key = (asset, owner, spender);
        let available = state.allowances.get(&key).copied().unwrap_or_default();
        let remaining =
            available
                .checked_sub(&amount)
                .ok_or(TrackerError::InsufficientAllowance {
                    available,
                    requested: amount,
                })?;
        state.move_balance(asset, owner, recipient, amount)?;
        state.allowances.insert(key, remaining);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn addr(b: u8) -> Address {
        Address::new([b; 20])
    }

    const TOKEN: u8 = 1;
    const ALICE: u8 = 2;
    const BOB: u8 = 3;
    const SPENDER: u8 = 4;

    fn funded() -> InMemoryLedger {
        let ledger = InMemoryLedger::new();
        let Ok(()) = ledger.mint(addr(TOKEN), addr(ALICE), Amount::new(1_000)) else {
            panic!("mint");
        };
        ledger
    }

    #[test]
    fn transfer_moves_balance() {
        let ledger = funded();
        let Ok(()) = ledger.transfer(addr(TOKEN), addr(ALICE), addr(BOB), Amount::new(400)) else {
            panic!("transfer");
        };
        assert_eq!(ledger.balance_of(addr(TOKEN), addr(ALICE)), Amount::new(600));
        assert_eq!(ledger.balance_of(addr(TOKEN), addr(BOB)), Amount::new(400));
        assert_eq!(ledger.total_supply(addr(TOKEN)), Amount::new(1_000));
    }

    #[test]
    fn transfer_over_balance_fails_without_change() {
        let ledger = funded();
        let result = ledger.transfer(addr(TOKEN), addr(ALICE), addr(BOB), Amount::new(1_001));
        assert!(matches!(result, Err(TrackerError::TransferFailed(_))));
        assert_eq!(ledger.balance_of(addr(TOKEN), addr(ALICE)), Amount::new(1_000));
    }

    #[test]
    fn self_transfer_is_a_no_op() {
        let ledger = funded();
        let Ok(()) = ledger.transfer(addr(TOKEN), addr(ALICE), addr(ALICE), Amount::new(10)) else {
            panic!("transfer");
        };
        assert_eq!(ledger.balance_of(addr(TOKEN), addr(ALICE)), Amount::new(1_000));
    }

    #[test]
    fn transfer_from_consumes_allowance() {
        let ledger = funded();
        ledger.approve(addr(TOKEN), addr(ALICE), addr(SPENDER), Amount::new(500));
        let Ok(()) = ledger.transfer_from(
            addr(TOKEN),
            addr(SPENDER),
            addr(ALICE),
            addr(BOB),
            Amount::new(300),
        ) else {
            panic!("transfer_from");
        };
        assert_eq!(
            ledger.allowance(addr(TOKEN), addr(ALICE), addr(SPENDER)),
            Amount::new(200)
        );
        assert_eq!(ledger.balance_of(addr(TOKEN), addr(BOB)), Amount::new(300));
    }

    #[test]
    fn transfer_from_without_allowance_fails() {
        let ledger = funded();
        let result = ledger.transfer_from(
            addr(TOKEN),
            addr(SPENDER),
            addr(ALICE),
            addr(BOB),
            Amount::new(1),
        );
        assert_eq!(
            result,
            Err(TrackerError::InsufficientAllowance {
                available: Amount::ZERO,
                requested: Amount::new(1),
            })
        );
    }

    #[test]
    fn failed_transfer_from_keeps_allowance() {
        let ledger = funded();
        ledger.approve(addr(TOKEN), addr(ALICE), addr(SPENDER), Amount::new(5_000));
        let result = ledger.transfer_from(
            addr(TOKEN),
            addr(SPENDER),
            addr(ALICE),
            addr(BOB),
            Amount::new(2_000),
        );
        assert!(matches!(result, Err(TrackerError::TransferFailed(_))));
        assert_eq!(
            ledger.allowance(addr(TOKEN), addr(ALICE), addr(SPENDER)),
            Amount::new(5_000)
        );
    }

    #[test]
    fn ensure_can_pull_checks_both_limits() {
        let ledger = funded();
        ledger.approve(addr(TOKEN), addr(ALICE), addr(SPENDER), Amount::new(2_000));
        assert!(ledger
            .ensure_can_pull(addr(TOKEN), addr(SPENDER), addr(ALICE), Amount::new(1_000))
            .is_ok());
        assert!(matches!(
            ledger.ensure_can_pull(addr(TOKEN), addr(SPENDER), addr(ALICE), Amount::new(1_500)),
            Err(TrackerError::TransferFailed(_))
        ));
    }
}
