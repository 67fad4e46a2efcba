//! Asset ledger seam: balances, allowances and transfers.
//!
//! The tracker never owns asset balances itself. Every movement of funds
//! (seed deposits, swap legs, liquidity deposits and withdrawals) goes
//! through an [`AssetLedger`], the same way an on-chain pool calls the
//! token contract. The invariant the pools maintain is that their recorded
//! reserves equal their balances on the ledger.
//!
//! # Atomicity
//!
//! Ledger calls are individually atomic: a failed `transfer_from` moves
//! nothing. Operations that move two legs check both legs with
//! [`AssetLedger::ensure_can_pull`] before moving either one.

use crate::domain::{Address, Amount};
use crate::error::TrackerError;

/// Multi-asset balance ledger.
///
/// One ledger serves every asset; each call names the asset by its
/// [`Address`]. Implementations must be `Send + Sync` so the
/// [`Exchange`](crate::exchange::Exchange) can share one across threads.
pub trait AssetLedger: Send + Sync {
    /// Returns `holder`'s balance of `asset`.
    fn balance_of(&self, asset: Address, holder: Address) -> Amount;

    /// Returns how much of `asset` `spender` may pull from `owner`.
    fn allowance(&self, asset: Address, owner: Address, spender: Address) -> Amount;

    /// Returns the total supply of `asset`.
    fn total_supply(&self, asset: Address) -> Amount;

    /// Moves `amount` of `asset` from `from` to `to` on `from`'s authority.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::TransferFailed`] if `from` holds less than
    /// `amount`.
    fn transfer(
        &self,
        asset: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), TrackerError>;

    /// Moves `amount` of `asset` from `owner` to `recipient` on `spender`'s
    /// allowance, decreasing that allowance.
    ///
    /// # Errors
    ///
    /// - [`TrackerError::InsufficientAllowance`] if the allowance is too small.
    /// - [`TrackerError::TransferFailed`] if `owner` holds less than `amount`.
    fn transfer_from(
        &self,
        asset: Address,
        spender: Address,
        owner: Address,
        recipient: Address,
        amount: Amount,
    ) -> Result<(), TrackerError>;

    /// Checks that `spender` could pull `amount` of `asset` from `owner`
    /// right now, without moving anything.
    ///
    /// # Errors
    ///
    /// The same errors [`transfer_from`](Self::transfer_from) would return.
    fn ensure_can_pull(
        &self,
        asset: Address,
        spender: Address,
        owner: Address,
        amount: Amount,
    ) -> Result<(), TrackerError> {
        let available = self.allowance(asset, owner, spender);
        if available < amount {
            return Err(TrackerError::InsufficientAllowance {
                available,
                requested: amount,
            });
        }
        if self.balance_of(asset, owner) < amount {
            return Err(TrackerError::TransferFailed("balance below transfer amount"));
        }
        Ok(())
    }
}
